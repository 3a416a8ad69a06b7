//! View dispatch: `send_file` and `view`

use super::ResponseBuilder;
use crate::error::{ResponseError, Result};
use crate::view::resolve::ViewCandidates;
use crate::view::Bindings;

impl ResponseBuilder<'_> {
    /// Render a view file into the body and return the rendered text
    ///
    /// `users.show` resolves to `<base>/users/show.<script_ext>` when that
    /// file exists, otherwise to `<base>/users/show.html`. Without a base
    /// path the logical path is used as-is.
    pub async fn send_file(&mut self, name: &str, bindings: &Bindings) -> Result<String> {
        self.ensure_open()?;
        let responder = self.responder;
        let candidates = ViewCandidates::new(
            responder.view_base_path(),
            name,
            responder.script_extension(),
        );
        let path = candidates
            .resolve()
            .await
            .map_err(|missing| ResponseError::ViewNotFound {
                path: missing.display().to_string(),
            })?;

        let source = tokio::fs::read_to_string(&path).await?;
        let rendered = responder.renderer().render_source(&source, bindings)?;
        self.write(rendered.as_bytes());
        Ok(rendered)
    }

    /// Render a named template through the view renderer
    pub fn view(&self, template: &str, bindings: &Bindings) -> Result<String> {
        self.responder.renderer().render(template, bindings)
    }
}
