mod sanitize;
mod token;
mod url;

pub use sanitize::{sanitize, sanitize_identifier, sanitize_with, Mode, IDENTIFIER_PREFIX};
pub use token::{is_canonical, AnchorToken};
pub use url::{build_url, strip_fragment, AnchorLinkSpec};
