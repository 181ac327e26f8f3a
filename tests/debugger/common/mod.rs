use digasm::remote::codec;
use digasm::remote::{TcpTransport, TransportConfig};
use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

/// Simulator stub: accepts one connection per scripted reply.
///
/// `None` reply means closing connection without answer.
pub struct MockSimulator {
    port: u16,
    handle: thread::JoinHandle<Vec<String>>,
}

impl MockSimulator {
    pub fn start(replies: Vec<Option<&'static str>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("binding to address");
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let mut requests = vec![];
            for reply in replies {
                let (mut conn, _) = listener.accept().expect("accepting connection");
                let payload = codec::read_frame(&mut conn).unwrap().unwrap();
                requests.push(String::from_utf8(payload).unwrap());
                if let Some(reply) = reply {
                    conn.write_all(&(reply.len() as u16).to_be_bytes()).unwrap();
                    conn.write_all(reply.as_bytes()).unwrap();
                }
            }
            requests
        });

        Self { port, handle }
    }

    pub fn transport(&self) -> TcpTransport {
        TcpTransport::new(transport_config(self.port))
    }

    /// Wait until all replies are served, return received requests.
    pub fn requests(self) -> Vec<String> {
        self.handle.join().unwrap()
    }
}

pub fn transport_config(port: u16) -> TransportConfig {
    TransportConfig {
        host: "127.0.0.1".to_string(),
        port,
        timeout: Some(Duration::from_secs(5)),
    }
}

/// Return port nobody listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// In-memory output, clones share the same buffer.
#[derive(Clone, Default)]
pub struct TestOutput(Rc<RefCell<Vec<u8>>>);

impl TestOutput {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for TestOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Source file with its map in temp directory, removed at drop.
pub struct Program {
    source: PathBuf,
}

impl Program {
    pub fn new(source: &str, map: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{}.asm", uuid::Uuid::new_v4()));
        fs::write(&path, source).unwrap();
        fs::write(path.with_extension("map"), map).unwrap();
        Self { source: path }
    }

    pub fn path(&self) -> &Path {
        &self.source
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        _ = fs::remove_file(&self.source);
        _ = fs::remove_file(self.source.with_extension("map"));
    }
}

pub const BLINK_SRC: &str = "\
; blink
start:
  LDI A,1
  LDI B,0
  MOV A,B
  OUT 0,A
  brk";

/// Address 0x1A is on line 5, address 0x1B onward is on line 7.
pub const BLINK_MAP: &str = r#"[
    {"addr": 0, "line": 3},
    {"addr": 2, "line": 4},
    {"addr": 26, "line": 5},
    {"addr": 27, "line": 7}
]"#;
