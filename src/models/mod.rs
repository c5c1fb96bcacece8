pub mod account;
pub mod profile;
pub mod user_record;

pub use account::{Account, AccountInvite, AccountMetadata, CallerIdentity, NewAccount, ProvisionedAccount};
pub use profile::{Profile, UserLevel};
pub use user_record::{merge_users, MergedUserRecord};
