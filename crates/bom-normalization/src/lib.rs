//! Record-level normalization for BOM part organization.
//!
//! Everything here works on one record at a time, before components are
//! compared with each other:
//!
//! - **Field names**: aliases such as `MPN` or `Digikey_PN` map to the
//!   canonical vocabulary
//! - **Filtering**: do-not-populate parts and parts of other variants are removed
//! - **Compound codes**: `qty:code` pairs and `;`/`,` lists are decoded
//! - **Sub-parts**: designators with several codes become one record per code
//!
//! # Example
//!
//! ```ignore
//! use bom_model::DistributorRegistry;
//! use bom_normalization::{FieldNormalizer, VariantFilter, remove_dnp_parts, subpart_split};
//!
//! let registry = DistributorRegistry::default();
//! let records = FieldNormalizer::new(&registry).normalize_record_set(&records);
//! let records = remove_dnp_parts(records, &VariantFilter::new("prod")?);
//! let records = subpart_split(records, &registry)?;
//! ```

pub mod aliases;
pub mod code;
pub mod filter;
pub mod subpart;

pub use aliases::{FieldNormalizer, canonical_field_name};
pub use code::{DecodedCode, decode_compound_code, split_part_list, unescape_separators};
pub use filter::{VariantFilter, dnp_flag_set, remove_dnp_parts};
pub use subpart::subpart_split;
