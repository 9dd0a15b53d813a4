//! Plain-TCP HTTP server over a dataset loaded once at startup. A broken or
//! missing dataset is fatal before the listener binds; nothing is reloaded
//! at request time.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;

pub mod api;
pub mod routes;

use crate::data::dataset::{load_dataset, AmbitionDataset};

pub fn run_server(bind_addr: &str, dataset_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = load_dataset(dataset_path)?;
    let listener = TcpListener::bind(bind_addr)?;
    println!(
        "ambitions server listening on http://{bind_addr} ({} ambitions from {})",
        dataset.ambitions.len(),
        dataset_path.display()
    );

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, &dataset) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream, dataset: &AmbitionDataset) -> std::io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let request_line = request.lines().next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let response = routes::route_request(method, path, dataset).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}
