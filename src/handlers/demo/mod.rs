// handlers/demo/mod.rs - Demo record handlers
//
// One file per operation on the /v1/demo route family.

pub mod create; // POST   /v1/demo
pub mod delete; // DELETE /v1/demo/:id
pub mod list;   // GET    /v1/demo
pub mod show;   // GET    /v1/demo/:id
pub mod update; // PUT    /v1/demo/:id

pub use create::demo_create;
pub use delete::demo_delete;
pub use list::demo_list;
pub use show::demo_show;
pub use update::demo_update;
