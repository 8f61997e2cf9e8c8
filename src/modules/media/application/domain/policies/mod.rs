pub mod asset_type_policy;
pub mod storage_policy;

pub use asset_type_policy::{AssetCategory, AssetTypePolicy, CategoryRules, UnknownCategory};
pub use storage_policy::StoragePolicy;
