use indexmap::IndexMap;

use super::params::to_route_path;
use super::responses::ResponseExtractor;
use super::server::strip_leading_slash;
use crate::model::Route;
use crate::model::builder::build_route;
use crate::parse::operation::PathItem;

/// One route per supported path + method pair, in declaration order.
pub fn extract_routes(paths: &IndexMap<String, PathItem>, responses: &ResponseExtractor) -> Vec<Route> {
    paths
        .iter()
        .flat_map(|(path, item)| {
            if !item.skipped_keys.is_empty() {
                log::debug!("{path}: ignoring non-method keys {:?}", item.skipped_keys);
            }
            let endpoint = strip_leading_slash(&to_route_path(path)).to_string();
            item.operations.iter().map(move |(method, op)| Route {
                documentation: op.documentation().to_string(),
                method: *method,
                endpoint: endpoint.clone(),
                responses: responses.extract(op),
                ..build_route()
            })
        })
        .collect()
}
