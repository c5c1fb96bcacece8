// handlers/admin - privileged user administration
//
// Each handler parses its body, then hands off to UserAdminService, which
// validates, runs the privilege gate and performs the provisioning call.
// CORS headers and preflight answers come from middleware::cors.

pub mod delete;
pub mod invite;
pub mod list;
pub mod utils;

pub use delete::delete_user;
pub use invite::invite_user;
pub use list::list_users;
