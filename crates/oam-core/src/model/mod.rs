pub mod builder;
pub mod environment;
pub mod status;

pub use environment::{
    Environment, Header, HttpMethod, ResponseRule, Route, RouteResponse, RuleTarget,
    RulesOperator,
};
pub use status::StatusCode;
