use heron_core::prelude::*;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn network(e: reqwest::Error) -> TransportError {
    TransportError::Network(e.to_string())
}

fn into_form(body: EncodedBody) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for (name, value) in body.fields {
        form = form.text(name, value);
    }

    if let Some(file) = body.file {
        let part = Part::stream(file.data)
            .file_name(file.filename)
            .mime_str(file.content_type)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        form = form.part(file.field, part);
    }

    Ok(form)
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.multipart(into_form(body)?);
        }

        let response = builder.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network)?;

        Ok(HttpResponse { status, body })
    }
}
