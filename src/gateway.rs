use crate::api::filters::routes;
use crate::endpoint::{NodeEndpoint, NodeRegistry};
use crate::error::GatewayError;
use crate::rpc::broker::{BackendKind, ConnectionBroker, GrpcBroker, Session};
use crate::settings::{ServerSettings, Settings};
use clap::{App, Arg};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{event, Level};

///
/// State shared by every request task: the endpoint table and the broker that opens
/// channels. Both are read-only, so cloning the gateway into each task is all the
/// synchronisation needed.
///
#[derive(Clone)]
pub struct Gateway {
    registry: Arc<NodeRegistry>,
    broker: Arc<dyn ConnectionBroker>,
}

impl Gateway {
    pub fn new(registry: NodeRegistry, broker: Arc<dyn ConnectionBroker>) -> Self {
        Gateway {
            registry: Arc::new(registry),
            broker,
        }
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn resolve(&self, name: &str) -> Result<&NodeEndpoint, GatewayError> {
        self.registry.resolve(name)
    }

    pub async fn open(
        &self,
        endpoint: &NodeEndpoint,
        kind: BackendKind,
    ) -> Result<Session, GatewayError> {
        self.broker.open(endpoint, kind).await
    }
}

///
/// The entry point to the gateway runtime
///
pub async fn run() -> crate::Result<()> {
    //
    // handle command-line arguments
    //
    let matches = App::new("Oasis Gateway")
        .about("Serves a REST API over the gRPC interface of Oasis nodes")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .default_value("config")
                .takes_value(true)
                .help("config file name"),
        )
        .get_matches();

    let config_name = matches.value_of("config").unwrap_or("config");

    //
    // load settings and build the endpoint table
    //
    // the table is never written after this point, request tasks
    // share it through an Arc without locking.
    //
    let settings = Settings::load(config_name)?;
    let registry = NodeRegistry::new(settings.nodes)?;
    if registry.is_empty() {
        event!(Level::WARN, "no nodes configured, every node query will fail");
    }
    event!(
        Level::INFO,
        nodes = ?registry.names(),
        "loaded endpoint table from {}",
        config_name
    );

    let gateway = Gateway::new(registry, Arc::new(GrpcBroker));

    tokio::select! {
        res = serve(gateway, settings.server) => {
            if let Err(err) = res {
                event!(Level::ERROR, "server err {:?}", err);
            }
        },
        _ = signal::ctrl_c() => {
            event!(Level::INFO, "Shutting down!");
        }
    }

    Ok(())
}

/// Runs warp::serve on the configured address until the server stops.
pub async fn serve(gateway: Gateway, server: ServerSettings) -> crate::Result<()> {
    let address = SocketAddr::from((server.host, server.port));
    let (bound, server) = warp::serve(routes(gateway)).try_bind_ephemeral(address)?;
    event!(Level::INFO, "gateway listening on {}", bound);
    server.await;
    Ok(())
}
