//! Route table and the guard that decides which screen renders for the
//! current auth state. The decision itself is a pure function so the
//! policy is testable without a browser.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::use_auth;
use crate::components::{
    AboutPage, AdminPage, AdminUsersPage, ComparePage, DataTablePage, FaqsPage, GraphPage,
    HomePage, LoginPage, NotFoundPage, PricingPage, SignupPage,
};

#[derive(Routable, Clone, Debug, Eq, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/graphs")]
    Graphs,
    #[at("/compare-graphs")]
    CompareGraphs,
    #[at("/data")]
    Data,
    #[at("/admin")]
    Admin,
    #[at("/admin/users")]
    AdminUsers,
    #[at("/pricing")]
    Pricing,
    #[at("/faqs")]
    Faqs,
    #[at("/about")]
    About,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    /// Marketing pages: reachable with or without a session.
    Public,
    /// Login/signup: an authenticated user is bounced to their landing page.
    GuestOnly,
    /// Any authenticated user.
    User,
    /// Authenticated admin only.
    Admin,
}

pub fn route_access(route: &Route) -> Access {
    match route {
        Route::Login | Route::Signup => Access::GuestOnly,
        Route::Admin | Route::AdminUsers => Access::Admin,
        Route::Pricing | Route::Faqs | Route::About | Route::NotFound => Access::Public,
        Route::Home | Route::Graphs | Route::CompareGraphs | Route::Data => Access::User,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Gate {
    Allow,
    ToLogin,
    ToHome,
    ToAdminHome,
}

pub fn gate(access: Access, logged_in: bool, is_admin: bool) -> Gate {
    match access {
        Access::Public => Gate::Allow,
        Access::GuestOnly => {
            if !logged_in {
                Gate::Allow
            } else if is_admin {
                Gate::ToAdminHome
            } else {
                Gate::ToHome
            }
        }
        Access::User => {
            if logged_in {
                Gate::Allow
            } else {
                Gate::ToLogin
            }
        }
        Access::Admin => {
            if logged_in && is_admin {
                Gate::Allow
            } else {
                Gate::ToLogin
            }
        }
    }
}

/// Where a fresh login lands, by role.
pub fn landing_route(is_admin: bool) -> Route {
    if is_admin {
        Route::Admin
    } else {
        Route::Home
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    pub route: Route,
    pub children: Children,
}

#[function_component(Guard)]
pub fn guard(props: &GuardProps) -> Html {
    let auth = use_auth();
    match gate(
        route_access(&props.route),
        auth.is_authenticated(),
        auth.is_admin(),
    ) {
        Gate::Allow => html! { <>{ props.children.clone() }</> },
        Gate::ToLogin => html! { <Redirect<Route> to={Route::Login} /> },
        Gate::ToHome => html! { <Redirect<Route> to={Route::Home} /> },
        Gate::ToAdminHome => html! { <Redirect<Route> to={Route::Admin} /> },
    }
}

pub fn switch(route: Route) -> Html {
    let screen = match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Signup => html! { <SignupPage /> },
        Route::Graphs => html! { <GraphPage /> },
        Route::CompareGraphs => html! { <ComparePage /> },
        Route::Data => html! { <DataTablePage /> },
        Route::Admin => html! { <AdminPage /> },
        Route::AdminUsers => html! { <AdminUsersPage /> },
        Route::Pricing => html! { <PricingPage /> },
        Route::Faqs => html! { <FaqsPage /> },
        Route::About => html! { <AboutPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };
    html! { <Guard route={route}>{ screen }</Guard> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marketing_pages_stay_public() {
        for route in [Route::Pricing, Route::Faqs, Route::About] {
            assert_eq!(route_access(&route), Access::Public);
            assert_eq!(gate(Access::Public, false, false), Gate::Allow);
            assert_eq!(gate(Access::Public, true, true), Gate::Allow);
        }
    }

    #[test]
    fn data_screens_require_login() {
        for route in [Route::Home, Route::Graphs, Route::CompareGraphs, Route::Data] {
            assert_eq!(route_access(&route), Access::User);
        }
        assert_eq!(gate(Access::User, false, false), Gate::ToLogin);
        assert_eq!(gate(Access::User, true, false), Gate::Allow);
    }

    #[test]
    fn admin_screens_require_the_role() {
        assert_eq!(route_access(&Route::Admin), Access::Admin);
        assert_eq!(route_access(&Route::AdminUsers), Access::Admin);
        assert_eq!(gate(Access::Admin, true, false), Gate::ToLogin);
        assert_eq!(gate(Access::Admin, false, false), Gate::ToLogin);
        assert_eq!(gate(Access::Admin, true, true), Gate::Allow);
    }

    #[test]
    fn login_lands_admins_on_the_admin_screen() {
        assert_eq!(landing_route(true), Route::Admin);
        assert_eq!(landing_route(false), Route::Home);
    }

    #[test]
    fn auth_screens_bounce_logged_in_users_by_role() {
        assert_eq!(gate(Access::GuestOnly, false, false), Gate::Allow);
        assert_eq!(gate(Access::GuestOnly, true, false), Gate::ToHome);
        assert_eq!(gate(Access::GuestOnly, true, true), Gate::ToAdminHome);
    }
}
