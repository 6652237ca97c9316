//! Fully qualified paths of std items used by generated code.
//!
//! Interpolating `#OptionFP` keeps the expansion independent of whatever the
//! caller has in scope under the name `Option`.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

macro_rules! define_fp {
    ($($name:ident => $path:path;)*) => {
        $(
            pub(crate) struct $name;

            impl ToTokens for $name {
                #[inline]
                fn to_tokens(&self, tokens: &mut TokenStream) {
                    tokens.extend(quote!(::$path));
                }
            }
        )*
    };
}

define_fp! {
    OptionFP => core::option::Option;
    ResultFP => core::result::Result;
    BoxFP => std::boxed::Box;
    DefaultFP => core::default::Default;
    CloneFP => core::clone::Clone;
    PartialEqFP => core::cmp::PartialEq;
    DebugFP => core::fmt::Debug;
    FormatterFP => core::fmt::Formatter;
    FmtResultFP => core::fmt::Result;
}
