use crate::endpoint::NodeEndpoint;
use crate::error::GatewayError;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tracing::{event, Level};

const UNIX_PREFIX: &str = "unix:";
const PEM_CERTIFICATE_MARKER: &[u8] = b"-----BEGIN CERTIFICATE-----";

/// Where a channel actually connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelTarget {
    Unix(String),
    Uri(String),
}

impl ChannelTarget {
    pub fn parse(socket: &str, tls: bool) -> ChannelTarget {
        if let Some(path) = socket.strip_prefix(UNIX_PREFIX) {
            // accept both unix:/path and unix:///path
            let path = path.strip_prefix("//").unwrap_or(path);
            return ChannelTarget::Unix(path.to_string());
        }
        if socket.contains("://") {
            return ChannelTarget::Uri(socket.to_string());
        }
        let scheme = if tls { "https" } else { "http" };
        ChannelTarget::Uri(format!("{}://{}", scheme, socket))
    }
}

/// Open a channel to `endpoint`, failing if the node cannot be reached.
pub async fn open_channel(endpoint: &NodeEndpoint) -> Result<Channel, GatewayError> {
    let target = ChannelTarget::parse(&endpoint.socket, endpoint.tls_cert_path.is_some());
    event!(Level::DEBUG, node = %endpoint.name, ?target, "opening channel");
    match target {
        ChannelTarget::Unix(path) => connect_unix(path)
            .await
            .map_err(|err| GatewayError::connection(&endpoint.socket, err)),
        ChannelTarget::Uri(uri) => {
            let mut builder = Endpoint::from_shared(uri)
                .map_err(|err| GatewayError::connection(&endpoint.socket, err))?;
            if let Some(cert_path) = &endpoint.tls_cert_path {
                let tls = load_tls_config(cert_path, endpoint.server_name())
                    .await
                    .map_err(|err| GatewayError::connection(&endpoint.socket, err))?;
                builder = builder
                    .tls_config(tls)
                    .map_err(|err| GatewayError::connection(&endpoint.socket, err))?;
            }
            builder
                .connect()
                .await
                .map_err(|err| GatewayError::connection(&endpoint.socket, describe(&err)))
        }
    }
}

#[cfg(unix)]
async fn connect_unix(path: String) -> Result<Channel, String> {
    use hyper_util::rt::TokioIo;
    use tokio::net::UnixStream;
    use tonic::transport::Uri;
    use tower::service_fn;

    // the connector ignores the URI, it only has to parse
    let channel = Endpoint::from_static("http://[::]:50051")
        .connect_with_connector(service_fn(move |_: Uri| {
            let path = path.clone();
            async move {
                let stream = UnixStream::connect(path).await?;
                Ok::<_, std::io::Error>(TokioIo::new(stream))
            }
        }))
        .await
        .map_err(|err| describe(&err))?;
    Ok(channel)
}

#[cfg(not(unix))]
async fn connect_unix(path: String) -> Result<Channel, String> {
    Err(format!("unix socket {} is not supported on this platform", path))
}

/// Read a PEM bundle of trusted roots and pin the expected server name.
pub async fn load_tls_config(cert_path: &str, server_name: &str) -> Result<ClientTlsConfig, String> {
    let pem = tokio::fs::read(cert_path)
        .await
        .map_err(|err| format!("failed to read certificate bundle {}: {}", cert_path, err))?;
    if !contains_certificate(&pem) {
        return Err(format!(
            "credentials: failed to append certificates from {}",
            cert_path
        ));
    }
    Ok(ClientTlsConfig::new()
        .ca_certificate(Certificate::from_pem(pem))
        .domain_name(server_name))
}

fn contains_certificate(pem: &[u8]) -> bool {
    pem.windows(PEM_CERTIFICATE_MARKER.len())
        .any(|window| window == PEM_CERTIFICATE_MARKER)
}

// transport errors keep the useful part in their source chain
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}
