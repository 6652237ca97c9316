#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use fm_mapper as mapper;
pub use fm_reflect as reflect;
pub use fm_utils as utils;

pub use fm_mapper::{Connector, MapError, Mapper, MergePolicy};
pub use fm_mapper::{find_struct, index_of, map, mapping_to_record, record_to_mapping};
