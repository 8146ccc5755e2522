use super::Role;

/// Per-role routing metadata: where the role lands after login, where
/// it authenticates, and which top-level namespaces it may enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRouting {
    pub role: Role,
    pub dashboard_url: &'static str,
    pub login_url: &'static str,
    pub allowed_routes: &'static [&'static str],
    pub login_banner: &'static str,
}

const CUSTOMER: RoleRouting = RoleRouting {
    role: Role::Customer,
    dashboard_url: "/",
    login_url: "/login",
    allowed_routes: &["/"],
    login_banner: "/login-customer-banner.png",
};

const TRAINER: RoleRouting = RoleRouting {
    role: Role::Trainer,
    dashboard_url: "/trainer",
    login_url: "/trainer/login",
    allowed_routes: &["/trainer"],
    login_banner: "/login-trainer-banner.png",
};

const ADMIN: RoleRouting = RoleRouting {
    role: Role::Admin,
    dashboard_url: "/admin",
    login_url: "/admin/login",
    allowed_routes: &["/admin"],
    login_banner: "/login-admin-banner.png",
};

// Master lands on the admin dashboard and may enter every namespace.
const MASTER: RoleRouting = RoleRouting {
    role: Role::Master,
    dashboard_url: "/admin",
    login_url: "/admin/login",
    allowed_routes: &["/", "/trainer", "/admin"],
    login_banner: "/login-admin-banner.png",
};

pub const fn routing_for(role: Role) -> &'static RoleRouting {
    match role {
        Role::Customer => &CUSTOMER,
        Role::Trainer => &TRAINER,
        Role::Admin => &ADMIN,
        Role::Master => &MASTER,
    }
}

/// Every request path belongs to exactly one namespace, decided by its
/// first segment. The customer area owns everything that is not
/// claimed by the trainer or admin namespaces.
pub fn route_namespace(path: &str) -> &'static str {
    if path == "/admin" || path.starts_with("/admin/") {
        "/admin"
    } else if path == "/trainer" || path.starts_with("/trainer/") {
        "/trainer"
    } else {
        "/"
    }
}

pub fn has_route_access(role: Role, path: &str) -> bool {
    routing_for(role).allowed_routes.contains(&route_namespace(path))
}

/// Which login page an unauthenticated request should be sent to,
/// based on the namespace it was trying to reach.
pub fn login_url_for_path(path: &str) -> &'static str {
    match route_namespace(path) {
        "/admin" => ADMIN.login_url,
        "/trainer" => TRAINER.login_url,
        _ => CUSTOMER.login_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_entry_per_role() {
        for role in Role::ALL {
            assert_eq!(routing_for(role).role, role);
        }
    }

    #[test]
    fn master_routes_are_the_union_of_all_namespaces() {
        let master = routing_for(Role::Master).allowed_routes;
        for role in [Role::Customer, Role::Trainer, Role::Admin] {
            for route in routing_for(role).allowed_routes {
                assert!(master.contains(route), "master missing {route}");
            }
        }
    }

    #[test]
    fn namespace_is_decided_by_first_segment() {
        assert_eq!(route_namespace("/admin/users"), "/admin");
        assert_eq!(route_namespace("/admin"), "/admin");
        assert_eq!(route_namespace("/trainer/templates/meal"), "/trainer");
        assert_eq!(route_namespace("/profile"), "/");
        assert_eq!(route_namespace("/"), "/");
        // A prefix match alone must not leak into another namespace.
        assert_eq!(route_namespace("/administrator"), "/");
        assert_eq!(route_namespace("/trainers"), "/");
    }

    #[test]
    fn customers_stay_out_of_staff_namespaces() {
        assert!(has_route_access(Role::Customer, "/profile"));
        assert!(!has_route_access(Role::Customer, "/admin/users"));
        assert!(!has_route_access(Role::Customer, "/trainer"));
        assert!(!has_route_access(Role::Trainer, "/admin/users"));
        assert!(has_route_access(Role::Trainer, "/trainer/meals"));
        assert!(!has_route_access(Role::Admin, "/trainer"));
        for path in ["/", "/trainer/assignments", "/admin/subscriptions"] {
            assert!(has_route_access(Role::Master, path));
        }
    }

    #[test]
    fn login_url_follows_the_namespace_being_accessed() {
        assert_eq!(login_url_for_path("/admin/users"), "/admin/login");
        assert_eq!(login_url_for_path("/trainer"), "/trainer/login");
        assert_eq!(login_url_for_path("/profile"), "/login");
    }
}
