use miette::Diagnostic;
use thiserror::Error;

/// Starter config printed when `element.config.yaml` is missing.
pub const STARTER_CONFIG: &str = "namespace: hello\n";

/// Main error type for element operations
#[derive(Error, Diagnostic, Debug)]
pub enum ElementError {
    #[error("IO error: {0}")]
    #[diagnostic(code(element::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(element::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Missing {file} in root.")]
    #[diagnostic(code(element::config::missing))]
    MissingConfig {
        file: String,
        #[help]
        help: String,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(element::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Missing required \"src/components\" directory.")]
    #[diagnostic(
        code(element::scan::components_dir),
        help("Create src/components/<namespace>/<component>/<component>.ts, or set `namespace` to build a single app")
    )]
    MissingComponentsDir,

    #[error("Missing at least 1 namespace folder under \"src/components/\"")]
    #[diagnostic(code(element::scan::namespaces))]
    NoNamespaces,

    #[error("Component \"{component}\" must extend HtmlElement or base class")]
    #[diagnostic(
        code(element::scan::class),
        help("Declare the element as `class Name extends Base` in its source file")
    )]
    MissingClassDeclaration { component: String },

    #[error("Class name \"{class_name}\" is declared by both {first} and {second}")]
    #[diagnostic(
        code(element::scan::duplicate_class),
        help("Class names must be unique across all components and examples")
    )]
    DuplicateClassName {
        class_name: String,
        first: String,
        second: String,
    },

    #[error("Unable to find namespace folder \"{namespace}\".")]
    #[diagnostic(
        code(element::rewrite::namespace),
        help("Possibly missing 'external' in element.config.yaml")
    )]
    UnresolvedNamespace { namespace: String },

    #[error("Bundler error: {message}")]
    #[diagnostic(code(element::bundler))]
    Bundler {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Watch error: {0}")]
    #[diagnostic(code(element::watch))]
    Watch(#[from] notify::Error),

    #[error("Dev server error: {message}")]
    #[diagnostic(code(element::server))]
    Server {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(element::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl ElementError {
    /// Missing config file, with a copy-pasteable starter config as help.
    pub fn missing_config(file: &str) -> Self {
        ElementError::MissingConfig {
            file: file.to_string(),
            help: format!("Add {} with content:\n\n{}", file, STARTER_CONFIG),
        }
    }

    /// Whether this error must abort the whole invocation rather than a
    /// single unit of work.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ElementError::MissingConfig { .. }
                | ElementError::Config { .. }
                | ElementError::MissingComponentsDir
                | ElementError::NoNamespaces
                | ElementError::MissingClassDeclaration { .. }
                | ElementError::DuplicateClassName { .. }
                | ElementError::UnresolvedNamespace { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ElementError>;
