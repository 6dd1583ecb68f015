use dockwright_core::{Framework, ImageConfig, Language, ProjectMeta, TechStack};

use crate::RenderError;
use crate::scalar::json_string;

/// Selects and fills one of the fixed Dockerfile templates.
pub struct DockerfileGenerator<'a> {
    images: &'a ImageConfig,
    stack: &'a TechStack,
    meta: &'a ProjectMeta,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(images: &'a ImageConfig, stack: &'a TechStack, meta: &'a ProjectMeta) -> Self {
        Self {
            images,
            stack,
            meta,
        }
    }

    pub fn render(&self) -> Result<String, RenderError> {
        let content = match self.stack.primary {
            Language::Go => self.go(),
            Language::Python => self.python()?,
            Language::Node => match self.meta.framework {
                Some(Framework::NextJs) => self.nextjs(),
                Some(Framework::React) => self.react(),
                _ => self.node()?,
            },
            other => return Err(RenderError::UnsupportedStack(other)),
        };
        tracing::debug!(
            language = %self.stack.primary,
            framework = self.meta.framework.map(Framework::as_str),
            "Dockerfile rendered"
        );
        Ok(content)
    }

    fn go(&self) -> String {
        format!(
            r#"FROM {builder} AS builder
WORKDIR /app

COPY . .
RUN go build -o app .

FROM {runtime}
WORKDIR /app

COPY --from=builder /app/app .

EXPOSE 8080
CMD ["./app"]
"#,
            builder = self.images.go_builder,
            runtime = self.images.go_runtime,
        )
    }

    fn python(&self) -> Result<String, RenderError> {
        Ok(format!(
            r#"FROM {base}

WORKDIR /app

COPY requirements.txt .

RUN pip install --no-cache-dir -r requirements.txt

COPY . .

EXPOSE {port}

CMD ["python", {entry}]
"#,
            base = self.images.python,
            port = self.meta.port,
            entry = json_string(&self.meta.entry_file)?,
        ))
    }

    fn node(&self) -> Result<String, RenderError> {
        Ok(format!(
            r#"FROM {base}

WORKDIR /app

COPY package*.json ./
RUN npm install

COPY . .

EXPOSE {port}

CMD ["node", {entry}]
"#,
            base = self.images.node,
            port = self.meta.port,
            entry = json_string(&self.meta.entry_file)?,
        ))
    }

    /// Static bundle built with npm, served by a plain HTTP file server.
    fn react(&self) -> String {
        format!(
            r#"FROM {base} AS builder
WORKDIR /app

COPY package*.json ./
RUN npm install

COPY . .

RUN npm run build

FROM {server}
COPY --from=builder /app/build /usr/share/nginx/html
"#,
            base = self.images.node,
            server = self.images.static_server,
        )
    }

    fn nextjs(&self) -> String {
        format!(
            r#"FROM {base} AS deps
WORKDIR /app

COPY package*.json ./
RUN npm install

COPY . .

RUN npm run build

EXPOSE 3000
CMD ["npm", "start"]
"#,
            base = self.images.node,
        )
    }
}
