pub mod matcher;
pub mod tokens;
pub mod window;

pub use matcher::{find_match, BruteForceMatcher, HashChainMatcher, MatchFinder};
pub use tokens::{Match, Token};
pub use window::{OutputWindow, Window};
