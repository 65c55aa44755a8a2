use crate::error::ResolveError;
use log::{debug, info};
use std::collections::HashMap;
use std::io::Read;

/// Download `url` fully into memory
///
/// The whole body is buffered so archive entries can be offered to the user
/// without re-reading a network stream.
pub fn fetch_bytes(
    url: &str,
    extra_headers: &HashMap<String, String>,
    user_agent: Option<&str>,
) -> Result<Vec<u8>, ResolveError> {
    let mut request = ureq::get(url);
    if let Some(user_agent) = user_agent {
        request = request.set("User-Agent", user_agent);
    }
    for (name, value) in extra_headers {
        request = request.set(name, value);
    }

    debug!("Checking binary from {url}");
    let response = match request.call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => {
            return Err(ResolveError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }
        Err(err) => {
            return Err(ResolveError::Transport {
                url: url.to_string(),
                source: Box::new(err),
            });
        }
    };

    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(ResolveError::HttpStatus {
            status,
            url: url.to_string(),
        });
    }

    info!("Starting download of {url}");
    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;
    debug!("Downloaded {} bytes from {url}", body.len());
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned response and report the request headers that were received
    fn serve_once(status_line: &str, body: &'static [u8]) -> (String, mpsc::Receiver<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let status_line = status_line.to_string();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                headers.push(line.trim_end().to_string());
            }
            tx.send(headers).unwrap();

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.write_all(body).unwrap();
        });

        (format!("http://{addr}/tool-linux-amd64"), rx)
    }

    #[test]
    fn test_fetch_bytes_success_sends_headers() {
        let (url, rx) = serve_once("200 OK", b"binary contents");
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer abc".to_string());

        let body = fetch_bytes(&url, &headers, Some("binpick-test")).unwrap();
        assert_eq!(body, b"binary contents");

        let received = rx.recv().unwrap();
        assert!(received.iter().any(|h| h.eq_ignore_ascii_case("authorization: Bearer abc")));
        assert!(received.iter().any(|h| h.eq_ignore_ascii_case("user-agent: binpick-test")));
    }

    #[test]
    fn test_fetch_bytes_non_2xx_is_an_error() {
        let (url, _rx) = serve_once("404 Not Found", b"missing");
        let err = fetch_bytes(&url, &HashMap::new(), None).unwrap_err();
        match &err {
            ResolveError::HttpStatus { status, url: failed } => {
                assert_eq!(*status, 404);
                assert_eq!(failed, &url);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("404 response when downloading"));
    }

    #[test]
    fn test_fetch_bytes_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetch_bytes(&format!("http://{addr}/x"), &HashMap::new(), None).unwrap_err();
        assert!(matches!(err, ResolveError::Transport { .. }));
    }
}
