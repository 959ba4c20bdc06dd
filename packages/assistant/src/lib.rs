pub mod address_list;
pub mod constants;
pub mod error;
pub mod fields;
pub mod installation;
pub mod keys;
pub mod permissions;
pub mod reader;
pub mod reconciler;
pub mod solidity_types;
pub mod status;
pub mod store;
pub mod validation;

pub use error::{AssistantError, CodecError, Result, StoreError, ValidationError};
pub use fields::{FieldSchema, FieldValues};
pub use installation::{InstallationChecker, Installer, PermissionGrant};
pub use permissions::Permissions;
pub use reader::{AssistantContext, ConfigReader, ConfigSnapshot, TypeConfig};
pub use reconciler::{ConfigReconciler, ReconcileOutcome};
pub use status::{AssistantStatus, Transition};
pub use store::{Erc725Store, MemoryProfileStore, ProfileStore, WriteBatch, WriteReceipt};
pub use validation::TipConfig;
