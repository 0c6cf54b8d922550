//! Method and path dispatch for the meals API.

use lambda_http::http::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Hello,
    List,
    Create,
    DeleteAll,
    Get(&'a str),
    Update(&'a str),
    Delete(&'a str),
    Preflight,
}

/// `path` is the gateway's decoded path; `{id}` binds to its second
/// segment verbatim and must be non-empty.
pub fn match_route<'a>(method: &Method, path: &'a str) -> Option<Route<'a>> {
    let resource = Resource::parse(path)?;

    let route = match (method, resource) {
        (&Method::GET, Resource::Root) => Route::Hello,
        (&Method::GET, Resource::Meals) => Route::List,
        (&Method::POST, Resource::Meals) => Route::Create,
        (&Method::DELETE, Resource::Meals) => Route::DeleteAll,
        (&Method::OPTIONS, Resource::Meals) => Route::Preflight,
        (&Method::GET, Resource::Meal(id)) => Route::Get(id),
        (&Method::PUT, Resource::Meal(id)) => Route::Update(id),
        (&Method::DELETE, Resource::Meal(id)) => Route::Delete(id),
        (&Method::OPTIONS, Resource::Meal(_)) => Route::Preflight,
        _ => return None,
    };
    Some(route)
}

#[derive(Debug, Clone, Copy)]
enum Resource<'a> {
    Root,
    Meals,
    Meal(&'a str),
}

impl<'a> Resource<'a> {
    fn parse(path: &'a str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        if rest.is_empty() {
            return Some(Self::Root);
        }

        let mut segments = rest.split('/');
        if segments.next()? != "meals" {
            return None;
        }
        match (segments.next(), segments.next()) {
            (None, _) => Some(Self::Meals),
            (Some(id), None) if !id.is_empty() => Some(Self::Meal(id)),
            _ => None,
        }
    }
}
