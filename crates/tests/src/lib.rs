//! # Integration Tests
//!
//! End-to-end tests for the replay pipeline.
//!
//! Covers:
//! - CSV files -> orchestrator -> HTTP receiver
//! - Load failures surfacing before any request
//! - Transport failures not halting a stream

#[cfg(test)]
mod contract_tests {
    use contracts::{Destination, StreamKind};

    #[test]
    fn test_stream_paths() {
        let dest = Destination::for_stream("localhost:8080", StreamKind::Uterus).unwrap();
        assert_eq!(dest.url(), "http://localhost:8080/uterus");
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::Write;
    use std::net::SocketAddr;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::extract::{Path as UrlPath, Query, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use contracts::StreamKind;
    use dispatcher::{HttpTransport, HttpTransportConfig, ReplayConfig, ReplayOrchestrator};
    use ingestion::{load_samples, LoadError};
    use serde::Deserialize;
    use tempfile::NamedTempFile;
    use tokio::time::Instant;

    #[derive(Debug, Deserialize)]
    struct ValueQuery {
        value: String,
    }

    #[derive(Debug, Clone)]
    struct Received {
        path: String,
        value: String,
        at: Instant,
    }

    type Log = Arc<Mutex<Vec<Received>>>;

    async fn receive(
        State(log): State<Log>,
        UrlPath(stream): UrlPath<String>,
        Query(query): Query<ValueQuery>,
    ) -> StatusCode {
        log.lock().unwrap().push(Received {
            path: stream,
            value: query.value,
            at: Instant::now(),
        });
        StatusCode::OK
    }

    async fn start_receiver() -> (SocketAddr, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/{stream}", post(receive))
            .with_state(Arc::clone(&log));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, log)
    }

    fn csv_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn orchestrator(
        bpm: &Path,
        uterus: &Path,
        target: &str,
        config: ReplayConfig,
    ) -> Result<ReplayOrchestrator<HttpTransport>, LoadError> {
        let bpm = load_samples(bpm, StreamKind::Bpm)?;
        let uterus = load_samples(uterus, StreamKind::Uterus)?;
        let transport = Arc::new(HttpTransport::new(HttpTransportConfig::default()).unwrap());
        Ok(ReplayOrchestrator::new(bpm, uterus, target, transport, config).unwrap())
    }

    /// Two bpm rows and one uterus row produce three paced POSTs
    #[tokio::test]
    async fn test_e2e_single_cycle() {
        let (addr, log) = start_receiver().await;
        let bpm = csv_file("time,value\n0.0,72\n1.0,75\n");
        let uterus = csv_file("time,value\n0.0,5\n");

        let replay = orchestrator(
            bpm.path(),
            uterus.path(),
            &addr.to_string(),
            ReplayConfig::default(),
        )
        .unwrap();

        let start = Instant::now();
        let stats = tokio::time::timeout(Duration::from_secs(10), replay.run())
            .await
            .expect("replay timed out");

        assert_eq!(stats.cycles_completed, 1);
        assert_eq!(stats.total_attempted(), 3);
        assert_eq!(stats.total_failed(), 0);

        let received = log.lock().unwrap().clone();
        assert_eq!(received.len(), 3);

        let bpm_values: Vec<_> = received
            .iter()
            .filter(|r| r.path == "bpm")
            .map(|r| r.value.as_str())
            .collect();
        assert_eq!(bpm_values, ["72.000000", "75.000000"]);

        let uterus_hit = received.iter().find(|r| r.path == "uterus").unwrap();
        assert_eq!(uterus_hit.value, "5.000000");
        assert!(uterus_hit.at.duration_since(start) < Duration::from_millis(800));

        let late = received.iter().find(|r| r.value == "75.000000").unwrap();
        assert!(late.at.duration_since(start) >= Duration::from_secs(1));
    }

    /// Looping with a cycle cap repeats the full schedule
    #[tokio::test]
    async fn test_e2e_loop_with_max_cycles() {
        let (addr, log) = start_receiver().await;
        let bpm = csv_file("time,value\n0.0,72\n0.1,73\n");
        let uterus = csv_file("time,value\n0.0,5\n");

        let config = ReplayConfig {
            loop_playback: true,
            max_cycles: Some(3),
            ..Default::default()
        };
        let replay = orchestrator(bpm.path(), uterus.path(), &addr.to_string(), config).unwrap();

        let stats = tokio::time::timeout(Duration::from_secs(10), replay.run())
            .await
            .expect("replay timed out");

        assert_eq!(stats.cycles_completed, 3);
        assert_eq!(log.lock().unwrap().len(), 9);
        assert_eq!(stats.stream(StreamKind::Bpm).unwrap().attempted, 6);
        assert_eq!(stats.stream(StreamKind::Uterus).unwrap().attempted, 3);
    }

    /// A malformed row is reported before any request goes out
    #[tokio::test]
    async fn test_load_error_sends_nothing() {
        let (addr, log) = start_receiver().await;
        let bpm = csv_file("time,value\n0.0,72\n1.0,abc\n");
        let uterus = csv_file("time,value\n0.0,5\n");

        let err = orchestrator(
            bpm.path(),
            uterus.path(),
            &addr.to_string(),
            ReplayConfig::default(),
        )
        .err()
        .expect("load should fail");

        match err {
            LoadError::InvalidField { line, raw, .. } => {
                assert_eq!(line, 3);
                assert_eq!(raw, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(log.lock().unwrap().is_empty());
    }

    /// Nothing listening: every delivery fails, yet the whole schedule runs
    #[tokio::test]
    async fn test_unreachable_target_keeps_going() {
        let closed = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let bpm = csv_file("time,value\n0.0,72\n0.05,73\n0.1,74\n");
        let uterus = csv_file("time,value\n0.0,5\n");

        let replay = orchestrator(
            bpm.path(),
            uterus.path(),
            &closed.to_string(),
            ReplayConfig::default(),
        )
        .unwrap();

        let stats = tokio::time::timeout(Duration::from_secs(10), replay.run())
            .await
            .expect("replay timed out");

        assert_eq!(stats.total_attempted(), 4);
        assert_eq!(stats.total_failed(), 4);
        assert_eq!(stats.stream(StreamKind::Bpm).unwrap().failed, 3);
    }
}
