//! Request context and identifier reconstruction.

/// How the host started the unit of work.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvocationKind {
    /// Serving a network request.
    Http,

    /// Unattended batch or command-line invocation.
    ///
    /// Batch units of work are not measured by default, to avoid noisy
    /// output on unattended jobs; see
    /// [`Session::measure_batch_invocations`](crate::Session::measure_batch_invocations).
    Batch,
}

/// Describes the unit of work being measured: how it was invoked and the
/// information needed to reconstruct its identifier for the report line.
///
/// # Examples
///
/// ```
/// use reqtop::RequestContext;
///
/// let context = RequestContext::http("example.com", "/a?b=1").with_tls(true);
/// assert_eq!(context.identifier(), "https://example.com/a?b=1");
///
/// let context = RequestContext::batch("/usr/local/bin/nightly-import");
/// assert_eq!(context.identifier(), "/usr/local/bin/nightly-import");
/// ```
#[derive(Clone, Debug)]
pub struct RequestContext {
    kind: InvocationKind,
    tls: bool,
    host: String,
    request_uri: String,
    script_path: String,
}

impl RequestContext {
    /// Creates a context for a unit of work serving a network request.
    ///
    /// The request is assumed to be plain `http` unless [`with_tls`] says
    /// otherwise. An empty `host` makes the identifier fall back to the
    /// script path, if one is provided via [`with_script_path`].
    ///
    /// [`with_tls`]: Self::with_tls
    /// [`with_script_path`]: Self::with_script_path
    pub fn http(host: impl Into<String>, request_uri: impl Into<String>) -> Self {
        Self {
            kind: InvocationKind::Http,
            tls: false,
            host: host.into(),
            request_uri: request_uri.into(),
            script_path: String::new(),
        }
    }

    /// Creates a context for an unattended batch or command-line invocation.
    ///
    /// The identifier is the filesystem path of the invoked script.
    pub fn batch(script_path: impl Into<String>) -> Self {
        Self {
            kind: InvocationKind::Batch,
            tls: false,
            host: String::new(),
            request_uri: String::new(),
            script_path: script_path.into(),
        }
    }

    /// Marks whether the request arrived over TLS.
    #[must_use]
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Sets the filesystem path of the invoked script, used as the
    /// identifier when no usable host is available.
    #[must_use]
    pub fn with_script_path(mut self, script_path: impl Into<String>) -> Self {
        self.script_path = script_path.into();
        self
    }

    /// How the host started this unit of work.
    #[must_use]
    pub fn kind(&self) -> InvocationKind {
        self.kind
    }

    pub(crate) fn is_batch(&self) -> bool {
        self.kind == InvocationKind::Batch
    }

    /// The identifier reported for this unit of work.
    ///
    /// Prefers a reconstructed absolute URL (`https` when TLS was in use,
    /// `http` otherwise). Falls back to the script path when no host is
    /// known, and to a `-` placeholder when neither is available; a report
    /// line is emitted in every case.
    #[must_use]
    pub fn identifier(&self) -> String {
        if !self.host.is_empty() {
            let scheme = if self.tls { "https" } else { "http" };
            format!("{scheme}://{}{}", self.host, self.request_uri)
        } else if !self.script_path.is_empty() {
            self.script_path.clone()
        } else {
            "-".to_string()
        }
    }
}
