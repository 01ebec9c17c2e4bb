use clap::Parser;
use std::{
    io::{BufRead, BufReader, ErrorKind, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
};

use macaddresslookup::cli::{self, Args};
use macaddresslookup_client::{Api, Error, MacAddress};
use serde_json::{json, Value};

fn response() -> String {
    json!({
        "vendorDetails": {
            "oui": "443839",
            "isPrivate": false,
            "companyName": "Cumulus Networks, Inc",
            "companyAddress": "650 Castro Street, suite 120-245 Mountain View CA 94041 US",
            "countryCode": "US"
        },
        "blockDetails": {
            "blockFound": true,
            "borderLeft": "443839000000",
            "borderRight": "443839FFFFFF",
            "blockSize": 16777216,
            "assignmentBlockSize": "MA-L",
            "dateCreated": "2012-04-08",
            "dateUpdated": "2015-09-27"
        },
        "macAddressDetails": {
            "searchTerm": "44:38:39:ff:ef:57",
            "isValid": true,
            "virtualMachine": "Not detected",
            "applications": ["Multi-Chassis Link Aggregation (Cumulus Linux)"],
            "transmissionType": "unicast",
            "administrationType": "UAA",
            "wiresharkNotes": "No details",
            "comment": ""
        }
    })
    .to_string()
}

// Answers exactly one request, returning the request head it received.
fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
        .unwrap();
        stream.flush().unwrap();
        head
    });
    (format!("http://{}/v1", addr), handle)
}

fn api(endpoint: &str) -> Api {
    let client = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap();
    Api::with_client(client, endpoint, "at_test".to_string())
}

fn run(endpoint: &str, argv: &[&str]) -> (anyhow::Result<()>, String) {
    let args = Args::parse_from(argv.iter().copied());
    let mac = MacAddress::parse(&args.macaddr).unwrap();
    let mut out = Vec::new();
    let res = cli::lookup(&api(endpoint), &mac, &args, &mut out);
    (res, String::from_utf8(out).unwrap())
}

#[test]
fn minimal_default() {
    let (endpoint, server) = serve_once("200 OK", response());
    let (res, out) = run(&endpoint, &["macaddresslookup", "44:38:39:ff:ef:57"]);
    res.unwrap();
    assert_eq!(out, "Cumulus Networks, Inc\n");

    let head = server.join().unwrap();
    assert!(
        head.starts_with("GET /v1?output=json&search=44%3A38%3A39%3Aff%3Aef%3A57 HTTP/1.1\r\n"),
        "{}",
        head
    );
    assert!(
        head.to_lowercase().contains("x-authentication-token: at_test\r\n"),
        "{}",
        head
    );
}

#[test]
fn csv_multiple_fields() {
    let (endpoint, server) = serve_once("200 OK", response());
    let (res, out) = run(
        &endpoint,
        &[
            "macaddresslookup",
            "-o",
            "csv",
            "-q",
            "name,transmission,valid,blockfound",
            "44-38-39-ff-ef-57",
        ],
    );
    res.unwrap();
    assert_eq!(
        out,
        "name,transmission,valid,blockfound\n\"Cumulus Networks, Inc\",\"unicast\",\"True\",\"True\"\n"
    );
    server.join().unwrap();
}

#[test]
fn json_output() {
    let (endpoint, server) = serve_once("200 OK", response());
    let (res, out) = run(
        &endpoint,
        &["macaddresslookup", "--output", "json", "--query", "countrycode,nothere", "443839ffef57"],
    );
    res.unwrap();
    assert_eq!(out, "{\"countrycode\": \"US\", \"nothere\": null}\n");
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, json!({"countrycode": "US", "nothere": null}));
    server.join().unwrap();
}

#[test]
fn rawjson_passthrough() {
    let (endpoint, server) = serve_once("200 OK", response());
    let (res, out) = run(&endpoint, &["macaddresslookup", "--rawjson", "-o", "csv", "44:38:39:ff:ef:57"]);
    res.unwrap();
    assert_eq!(out, format!("{}\n", response()));
    server.join().unwrap();
}

#[test]
fn malformed_body_is_not_fatal() {
    let (endpoint, server) = serve_once("200 OK", "<html>oops</html>".to_string());
    let (res, out) = run(&endpoint, &["macaddresslookup", "-q", "name,valid", "44:38:39:ff:ef:57"]);
    res.unwrap();
    assert_eq!(out, "name=None\nvalid=None\n");
    server.join().unwrap();
}

#[test]
fn http_error_exit_code() {
    let (endpoint, server) = serve_once(
        "401 Unauthorized",
        json!({"error": "Access restricted"}).to_string(),
    );
    let (res, out) = run(&endpoint, &["macaddresslookup", "44:38:39:ff:ef:57"]);
    let err = res.unwrap_err();
    assert_eq!(cli::exit_code(&err), 401);
    assert!(err.to_string().contains("401 Unauthorized"), "{}", err);
    assert!(err.to_string().contains("Access restricted"), "{}", err);
    assert!(out.is_empty());
    server.join().unwrap();
}

#[test]
fn connection_refused_exit_code() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/v1", listener.local_addr().unwrap());
    drop(listener);

    let (res, out) = run(&endpoint, &["macaddresslookup", "44:38:39:ff:ef:57"]);
    assert_eq!(cli::exit_code(&res.unwrap_err()), 1);
    assert!(out.is_empty());
}

// A listener that fails the test if anything connects to it.
fn silent_endpoint() -> (String, TcpListener) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    (format!("http://{}/v1", listener.local_addr().unwrap()), listener)
}

fn assert_no_request(listener: &TcpListener) {
    match listener.accept() {
        Err(err) => assert_eq!(err.kind(), ErrorKind::WouldBlock),
        Ok((_, peer)) => panic!("unexpected connection from {}", peer),
    }
}

fn run_checked(endpoint: &str, mac: &str, api_key: Option<&str>) -> (anyhow::Result<()>, String) {
    let args = Args::parse_from(["macaddresslookup", mac]);
    let mut out = Vec::new();
    let res = cli::run(&args, endpoint, api_key.map(str::to_string), &mut out);
    (res, String::from_utf8(out).unwrap())
}

#[test]
fn missing_api_key_makes_no_request() {
    let (endpoint, listener) = silent_endpoint();
    for key in [None, Some("")] {
        let (res, out) = run_checked(&endpoint, "44:38:39:ff:ef:57", key);
        let err = res.unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::MissingApiKey)));
        assert_eq!(cli::exit_code(&err), 1);
        assert!(out.is_empty());
    }
    assert_no_request(&listener);
}

#[test]
fn invalid_mac_makes_no_request() {
    let (endpoint, listener) = silent_endpoint();
    let (res, out) = run_checked(&endpoint, "44:38:39:ff:ef", Some("at_test"));
    let err = res.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidMacAddress(addr)) if addr == "44:38:39:ff:ef"
    ));
    assert_eq!(cli::exit_code(&err), 1);
    assert!(out.is_empty());
    assert_no_request(&listener);
}

#[test]
fn api_key_checked_before_mac() {
    let (endpoint, listener) = silent_endpoint();
    let (res, _) = run_checked(&endpoint, "not-a-mac", None);
    let err = res.unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::MissingApiKey)));
    assert_no_request(&listener);
}
