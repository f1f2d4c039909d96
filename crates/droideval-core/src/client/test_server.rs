//! One-shot HTTP stub for exercising the backends over a real socket.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::time::Duration;

/// A listener on an ephemeral port that serves exactly one request.
pub struct StubServer {
    pub base_url: String,
    request: mpsc::Receiver<String>,
}

impl StubServer {
    /// Reply with `status` (e.g. `"200 OK"`) and a JSON `body`.
    pub fn respond(status: &'static str, body: &'static str) -> Self {
        Self::serve(move |stream| {
            let resp = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(resp.as_bytes());
        })
    }

    /// Read the request, then hold the connection open without answering.
    pub fn hang(hold: Duration) -> Self {
        Self::serve(move |_stream| std::thread::sleep(hold))
    }

    fn serve(reply: impl FnOnce(&mut TcpStream) + Send + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, request) = mpsc::channel();

        std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else { return };
            let _ = tx.send(read_request(&stream));
            reply(&mut stream);
        });

        Self { base_url, request }
    }

    /// Raw request text (head and body) the server received.
    pub fn request(&self) -> String {
        self.request.recv_timeout(Duration::from_secs(5)).unwrap()
    }
}

fn read_request(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut head = String::new();
    let mut content_length = 0;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
        let end_of_head = line == "\r\n";
        head.push_str(&line);
        if end_of_head {
            break;
        }
    }

    let mut body = vec![0; content_length];
    let _ = reader.read_exact(&mut body);
    head + &String::from_utf8_lossy(&body)
}
