use async_trait::async_trait;
use gloo::net::http::{
  Request,
  Response
};
use taskboard_core::{
  ApiRequest,
  BoardError,
  Method,
  Transport
};
use taskboard_shared::Envelope;
use wasm_bindgen::JsValue;
use web_sys::{
  RequestCredentials,
  UrlSearchParams
};

/// Same-origin fetch transport. The
/// session cookie rides along on every
/// call.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport;

#[async_trait(?Send)]
impl Transport for HttpTransport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<Envelope, BoardError> {
    let response = match request.method {
      | Method::Get => {
        Request::get(&request.url)
          .query(request.params.iter().map(
            |(name, value)| {
              (*name, value.as_str())
            }
          ))
          .credentials(
            RequestCredentials::Include
          )
          .send()
          .await
      }
      | Method::Post => {
        let body =
          form_body(&request.params)?;
        Request::post(&request.url)
          .credentials(
            RequestCredentials::Include
          )
          .body(body)
          .map_err(|err| {
            BoardError::transport(
              err.to_string()
            )
          })?
          .send()
          .await
      }
    }
    .map_err(|err| {
      tracing::error!(url = %request.url, error = %err, "fetch failed");
      BoardError::transport(err.to_string())
    })?;

    decode_envelope(response).await
  }
}

fn form_body(
  params: &[(&'static str, String)]
) -> Result<UrlSearchParams, BoardError> {
  let body = UrlSearchParams::new()
    .map_err(js_failure)?;
  for (name, value) in params {
    body.append(name, value);
  }
  Ok(body)
}

async fn decode_envelope(
  response: Response
) -> Result<Envelope, BoardError> {
  let status = response.status();
  if status == 401 {
    return Err(BoardError::Unauthenticated);
  }
  if !response.ok() {
    return Err(BoardError::transport(
      format!(
        "HTTP {status} from {}",
        response.url()
      )
    ));
  }
  response.json::<Envelope>().await.map_err(
    |err| match err {
      | gloo::net::Error::SerdeError(
        err
      ) => BoardError::decode(
        err.to_string()
      ),
      | other => BoardError::transport(
        other.to_string()
      )
    }
  )
}

fn js_failure(err: JsValue) -> BoardError {
  BoardError::transport(format!(
    "{err:?}"
  ))
}
