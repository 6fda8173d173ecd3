use heron_core::prelude::*;
use tokio::fs;

/// Assembles the multipart body of a submission.
pub struct PayloadBuilder<'a, E: EventSink> {
    events: &'a E,
}

impl<'a, E: EventSink> PayloadBuilder<'a, E> {
    pub fn new(events: &'a E) -> Self {
        Self { events }
    }

    /// Encodes the text fields and, if present and reachable, the reference attachment.
    ///
    /// A configured path that does not exist falls back to a text-only body and emits
    /// [`JobEvent::AttachmentMissing`]. A path that exists but can't be read is an error.
    pub async fn build(&self, spec: &JobSpec) -> Result<EncodedBody, std::io::Error> {
        let mut body = EncodedBody::default()
            .text(fields::PROMPT, &spec.prompt)
            .text(fields::MODEL, &spec.model)
            .text(fields::SIZE, &spec.size)
            .text(fields::SECONDS, &spec.seconds);

        let Some(attachment) = &spec.attachment else {
            return Ok(body);
        };

        let data = match &attachment.source {
            AttachmentSource::Bytes(data) => data.clone(),
            AttachmentSource::Path(path) => {
                if !matches!(fs::try_exists(path).await, Ok(true)) {
                    self.events
                        .emit(JobEvent::AttachmentMissing { path: path.clone() });
                    return Ok(body);
                }
                fs::read(path).await?.into()
            }
        };

        body.file = Some(FilePart {
            field: fields::INPUT_REFERENCE,
            filename: attachment.filename.clone(),
            content_type: attachment.content_type(),
            data,
        });

        Ok(body)
    }
}
