//! Routing definitions for the TriupAct UI.
use triupact_core::resources::Resource;
use yew_router::prelude::*;

use crate::shell::NavTarget;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/departments")]
    Departments,
    #[at("/data/:slug")]
    Data { slug: String },
    #[at("/users")]
    Users,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub(crate) fn for_target(target: NavTarget) -> Self {
        match target {
            NavTarget::Dashboard => Self::Dashboard,
            NavTarget::Resource(Resource::DepartmentDirectory) => Self::Departments,
            NavTarget::Resource(Resource::Users) => Self::Users,
            NavTarget::Resource(resource) => Self::Data {
                slug: resource.slug().to_string(),
            },
        }
    }
}
