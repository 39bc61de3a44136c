//! Hierarchical navigation menus.
//!
//! A [`MenuTree`] holds ordered, named menu items. Items carry their link
//! target, HTML attributes and access rules; the tree answers which item is
//! current, which items a user may see, and renders the visible part as
//! nested lists. Subtrees can be copied, sliced, split and exported to
//! plain data.

pub mod access;
pub mod attributes;
pub mod config;
pub mod context;
pub mod credentials;
mod current;
pub mod error;
pub mod export;
pub mod item;
mod label;
pub mod loader;
pub mod locale;
pub mod render;
pub mod routes;
pub mod security;
pub mod slice;
pub mod tree;
pub mod user;
pub mod visit;

pub use access::AccessPolicy;
pub use attributes::{Attributes, OrderedMap, Options};
pub use config::MenuConfig;
pub use context::{LabelTranslator, MenuContext, RouteError, RouteResolver, SecurityUser, UrlRequest};
pub use credentials::{Credentials, Requirement};
pub use error::{MenuError, MenuResult};
pub use export::ItemData;
pub use item::{ItemId, MenuItem, NewItem};
pub use loader::NavigationConfig;
pub use locale::CatalogTranslator;
pub use render::{ListRenderer, MenuRenderer, RenderOptions, html_escape};
pub use routes::StaticRoutes;
pub use security::{RouteRule, RouteSecurity, SecurityRules};
pub use slice::{Bound, Split};
pub use tree::{ChildRef, ItemRef, MenuTree};
pub use user::SessionUser;
pub use visit::MenuVisitor;
