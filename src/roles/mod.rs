mod model;
mod routing;

pub use model::{InvalidRole, Role};
pub use routing::{
    has_route_access, login_url_for_path, route_namespace, routing_for, RoleRouting,
};
