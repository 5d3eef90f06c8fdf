use ncd::{proto, router, services::Services};

use anyhow::Result;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{io::AsyncWriteExt, net::TcpListener};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    // Config via env: NC_ADDR, NC_HOST, NC_MATRIX, NC_CATALOG
    let services = Arc::new(Services::from_env());
    eprintln!("[boot] canonical host {}", services.host);
    eprintln!("[boot] matrix source {}", services.matrix_path.display());
    eprintln!(
        "[boot] catalog: {} core pages, {} services, {} states",
        services.catalog.core_pages.len(),
        services.catalog.services.len(),
        services.catalog.states.len()
    );

    let listener = TcpListener::bind(&services.addr).await?;
    eprintln!("ncd listening on http://{}", services.addr);

    loop {
        let (stream, peer) = listener.accept().await?;
        let services = services.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_conn(stream, &services, peer).await {
                eprintln!("[http] connection {peer} error: {err}");
            }
        });
    }
}

async fn handle_conn(
    mut stream: tokio::net::TcpStream,
    services: &Services,
    _peer: SocketAddr,
) -> Result<()> {
    // One request per connection; keep-alive is the proxy's job.
    let req = match proto::http::read_request(&mut stream).await {
        Ok(r) => r,
        Err(code) => {
            let resp = proto::http::make_empty_response(code);
            stream.write_all(&resp).await?;
            return Ok(());
        }
    };

    let response = router::handle(services, req)?;
    let bytes = response.into_bytes();
    stream.write_all(&bytes).await?;
    Ok(())
}
