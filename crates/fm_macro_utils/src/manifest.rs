use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for another crate as seen from the
/// caller's Cargo.toml.
///
/// This helper is intended for proc-macro code generation where the emitted
/// path must be valid from the invoking crate.
///
/// # Example
///
/// ```rust
/// # use fm_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("fm_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `fm_` and the target crate
///    depends on the facade crate `fieldmap`, return `::fieldmap::short_name`
///    (e.g. `fm_reflect` -> `::fieldmap::reflect`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// ## Note
///
/// A crate that derives its own types should add
/// `extern crate self as fm_reflect;` in the crate root, so that the
/// absolute path resolves inside the crate as well.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "fieldmap";
const CRATE_PREFIX: &str = "fm_";

impl Manifest {
    // Try get `Cargo.toml` path.
    fn get_manifest_path() -> Option<PathBuf> {
        env::var_os("CARGO_MANIFEST_DIR").map(|path| {
            let mut path = PathBuf::from(path);
            path.push("Cargo.toml");
            path
        })
    }

    fn read_manifest(path: &Path) -> Document<Box<str>> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|text| Document::parse(text.into_boxed_str()).ok())
            .unwrap_or_else(Self::empty_document)
    }

    fn empty_document() -> Document<Box<str>> {
        // An empty string is always a valid TOML document.
        match Document::parse(Box::<str>::from("")) {
            Ok(doc) => doc,
            Err(e) => panic!("failed to build empty manifest: {e}"),
        }
    }

    // Attempt to parse the provided path as a syntax tree node.
    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        match syn::parse_str(path) {
            Ok(v) => v,
            Err(e) => panic!("`{path}` is not a valid path: {e}"),
        }
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_str(&format!("::{name}")));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            let mut path = Self::parse_str::<syn::Path>(&format!("::{FACADE_NAME}"));
            path.segments.push(Self::parse_str(module));
            return Some(path);
        }
        None
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution
    /// order.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(val) = Self::find_in_deps(deps, name)
            {
                return val;
            }
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Obtain the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// The parsed manifest is cached per path and re-read only when the file's
    /// modified time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(manifest_path) = Self::get_manifest_path() else {
            return func(&Manifest {
                manifest: Self::empty_document(),
                modified_time: None,
            });
        };
        let modified_time = std::fs::metadata(&manifest_path)
            .and_then(|metadata| metadata.modified())
            .ok();

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: toml_edit::Document::parse(Box::<str>::from(text)).unwrap(),
            modified_time: None,
        }
    }

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let prefix = if path.leading_colon.is_some() { "::" } else { "" };
        format!("{prefix}{}", segments.join("::"))
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nfm_reflect = { path = \"x\" }\n");
        assert_eq!(path_string(&m.get_crate_path("fm_reflect")), "::fm_reflect");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dependencies]\nfieldmap = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("fm_reflect")), "::fieldmap::reflect");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\nfieldmap = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("fm_reflect")), "::fieldmap::reflect");

        let m = manifest("[package]\nname = \"other\"\n");
        assert_eq!(path_string(&m.get_crate_path("fm_reflect")), "::fm_reflect");
    }
}
