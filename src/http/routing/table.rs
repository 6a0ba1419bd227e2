//! Ordered route table.
//!
//! Routes are tried in the order they were registered and the first one
//! whose method and template both match wins. Templates are `/`-separated
//! literals and `{name}` parameters; there is no trailing-slash folding.

use http::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone)]
struct Route<H> {
    method: Method,
    segments: Vec<Segment>,
    handler: H,
}

/// Path parameters in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self { Self { routes: Vec::new() } }
}

impl<H: Copy> RouteTable<H> {
    pub fn new() -> Self { Self::default() }

    /// Append a route. Returns `self` so registrations chain.
    pub fn route(mut self, method: Method, template: &str, handler: H) -> Self {
        let segments = template
            .split('/')
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ => Segment::Literal(s.to_string()),
            })
            .collect();
        self.routes.push(Route { method, segments, handler });
        self
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Option<(H, PathParams)> {
        let parts: Vec<&str> = path.split('/').collect();
        self.routes
            .iter()
            .filter(|r| r.method == *method)
            .find_map(|r| r.matches(&parts).map(|params| (r.handler, params)))
    }
}

impl<H> Route<H> {
    fn matches(&self, parts: &[&str]) -> Option<PathParams> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit.as_str() == *part => {}
                Segment::Param(name) if !part.is_empty() => params.push((name.clone(), (*part).to_string())),
                _ => return None,
            }
        }
        Some(PathParams(params))
    }
}
