mod add;
mod add_wide;
mod add_with_context;
mod echo_binary;
mod echo_string;
mod ping;

pub use add::Add;
pub use add_wide::AddWide;
pub use add_with_context::AddWithContext;
pub use echo_binary::EchoBinary;
pub use echo_string::EchoString;
pub use ping::Ping;
