//! Domain models shared by repositories, routes and views

pub mod project;
pub mod session;
pub mod task;
pub mod user;

// Re-export for convenience
pub use project::{NewProject, Project};
pub use session::{Session, SessionUser};
pub use task::{NewTask, Task, TaskFilter, TaskStatus, TaskUpdate};
pub use user::{NewUser, Role, User};
