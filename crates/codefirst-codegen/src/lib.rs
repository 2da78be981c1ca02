pub mod csharp;

mod host;
pub use host::{FrameworkVersion, Host, Kind, Scope};

mod renderer;
pub use renderer::Renderer;

mod template;
pub use template::{Template, Templates};

use codefirst_core::Result;
