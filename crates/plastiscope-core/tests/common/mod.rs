#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use image::{Rgba, RgbaImage};
use plastiscope_core::detection::{Detection, PredictionResponse};

/// Detection with label 1 (microplastic).
pub fn det(x1: f64, y1: f64, x2: f64, y2: f64, score: f64) -> Detection {
    Detection::new([x1, y1, x2, y2], score, 1)
}

/// Five detections spanning all confidence ranges, in backend order.
pub fn sample_detections() -> Vec<Detection> {
    vec![
        det(10.0, 10.0, 50.0, 50.0, 0.92),
        det(60.0, 5.0, 90.0, 30.0, 0.55),
        det(5.0, 60.0, 25.0, 95.0, 0.31),
        det(40.0, 40.0, 70.0, 80.0, 0.81),
        det(0.0, 0.0, 12.4, 7.6, 0.67),
    ]
}

pub fn sample_response() -> PredictionResponse {
    PredictionResponse {
        width: 100,
        height: 100,
        detections: sample_detections(),
    }
}

pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> Arc<RgbaImage> {
    Arc::new(RgbaImage::from_pixel(
        width,
        height,
        Rgba([rgb[0], rgb[1], rgb[2], 255]),
    ))
}

/// Write a solid PNG into `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([40, 40, 40, 255]))
        .save(&path)
        .expect("write png");
    path
}

/// One-shot HTTP server on localhost. Reads a full request (headers plus
/// `Content-Length` body), replies with `status` and `body`, and hands the
/// raw request head back through the join handle.
pub fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read line");
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap_or(0);
            }
            head.push_str(&line);
        }
        let mut body_buf = vec![0u8; content_length];
        reader.read_exact(&mut body_buf).expect("read body");
        head.push_str(&String::from_utf8_lossy(&body_buf));

        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write");
        stream.flush().expect("flush");
        head
    });
    (format!("http://{addr}"), handle)
}

/// Encode a solid PNG in memory.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255]))
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}
