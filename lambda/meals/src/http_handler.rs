use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Request, RequestExt, Response};
use tracing::{debug, info_span, Instrument};

use crate::context::RequestContext;
use crate::handlers::MealHandlers;
use crate::response::Reply;
use crate::router::{match_route, Route};

pub async fn function_handler(
    handlers: &MealHandlers,
    event: Request,
) -> Result<Response<Body>, Error> {
    let ctx = RequestContext::from_request(&event);
    let path = route_path(&event);
    let span = info_span!(
        "request",
        request_id = %ctx.request_id,
        method = %event.method(),
        path = %path
    );
    let reply = dispatch(handlers, &ctx, &event, &path)
        .instrument(span)
        .await;
    debug!(status = reply.status.as_u16(), "responding");

    Ok(reply.into_response()?)
}

/// Path as the gateway resolved it: no stage prefix, percent-decoded.
/// Requests built outside a gateway event carry no raw path, so fall back
/// to the URI.
fn route_path(event: &Request) -> String {
    let raw = event.raw_http_path();
    if raw.is_empty() {
        event.uri().path().to_string()
    } else {
        raw.to_string()
    }
}

async fn dispatch(
    handlers: &MealHandlers,
    ctx: &RequestContext,
    event: &Request,
    path: &str,
) -> Reply {
    let body = event.body().as_ref();

    match match_route(event.method(), path) {
        Some(Route::Preflight) => Reply::empty(StatusCode::OK),
        Some(Route::Hello) => handlers.hello(),
        Some(Route::List) => handlers.list(ctx).await,
        Some(Route::Create) => handlers.create(ctx, body).await,
        Some(Route::DeleteAll) => handlers.delete_all(ctx).await,
        Some(Route::Get(id)) => handlers.get(ctx, id).await,
        Some(Route::Update(id)) => handlers.update(ctx, id, body).await,
        Some(Route::Delete(id)) => handlers.delete(ctx, id).await,
        None => {
            debug!("no route matched");
            Reply::not_found()
        }
    }
}
