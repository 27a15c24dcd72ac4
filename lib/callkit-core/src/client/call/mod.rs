use http::Method;

use super::ApiClient;
use super::parameters::Argument;

mod builder;
mod execution;

/// One operation call being prepared.
///
/// Arguments are recorded in signature order with [`with_arg`](Self::with_arg)
/// and flattened only when the call is executed (or inspected with
/// [`to_request`](Self::to_request)), so recording never fails on a type error.
///
/// # Method Groups
///
/// ## Arguments
/// - [`with_arg(name, value, type, location)`](Self::with_arg) - Record a serializable argument
/// - [`with_value(name, value, type, location)`](Self::with_value) - Record a JSON argument
/// - [`with_optional_arg(...)`](Self::with_optional_arg) - Record an argument only if present
///
/// ## Inspection
/// - [`parameters()`](Self::parameters) - Flatten the arguments
/// - [`to_request()`](Self::to_request) - Assemble without sending
///
/// ## Execution
/// - `.await` - Assemble, send through the configured transport, return its response
#[derive(derive_more::Debug)]
pub struct ApiCall<T> {
    #[debug(skip)]
    pub(super) client: ApiClient<T>,

    pub(super) method: Method,
    pub(super) route: String,
    pub(super) arguments: Vec<Argument>,
}
