pub mod environment;
pub mod paths;
pub mod platform;

pub use environment::{HostContext, get_home_dir};
pub use paths::{ROOT_PROFILE, format_path_with_tilde, relative_profile_name, snapshot_uri};
pub use platform::Platform;
