//! Replay recorded decoder output through the whole pipeline and check the
//! generated C pair on disk.

use std::future::pending;

use uat_fixtures::emit::DEFAULT_BASENAME;
use uat_fixtures::{render, Pipeline, RunOutcome};

fn downlink_hex() -> String {
    // 18-byte basic downlink: type 0, qualifier 0, address ABCDEF
    let mut bytes = vec![0u8; 18];
    bytes[1..4].copy_from_slice(&[0xAB, 0xCD, 0xEF]);
    hex::encode(bytes)
}

fn replay() -> String {
    let info_frames: Vec<String> = (0..11)
        .map(|i| format!(r#"{{"length":{},"type":0}}"#, 10 + i))
        .collect();
    [
        "# recorded 2015-06-01".to_string(),
        format!(
            r#"{{"type":"downlink","frame":"{}","mdb":{{"address":11259375,"has_sv":true,"position_valid":true,"lat":40.0,"lon":-80.0}}}}"#,
            downlink_hex()
        ),
        r#"{"type":"downlink","frame":"00","error":"uncorrectable"}"#.to_string(),
        "garbage".to_string(),
        format!(
            r#"{{"type":"uplink","frame":"{}","mdb":{{"slot_id":5,"tisb_site_id":3,"num_info_frames":11,"info_frames":[{}]}}}}"#,
            "5a".repeat(432),
            info_frames.join(",")
        ),
    ]
    .join("\n")
}

#[tokio::test]
async fn test_replay_writes_fixture_pair() {
    let input = replay();
    let mut pipeline = Pipeline::new(1000);
    let outcome = pipeline.run(input.as_bytes(), pending::<()>()).await.unwrap();
    assert_eq!(outcome, RunOutcome::Exhausted);

    let stats = pipeline.stats().clone();
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.captured(), 2);
    assert_eq!(stats.decode_failures, 1);
    assert_eq!(stats.malformed, 1);

    let store = pipeline.into_store();
    let uplink = &store.uplink.as_slice()[0].record;
    assert_eq!(uplink.num_info_frames, 11);
    assert_eq!(uplink.info_frames.len(), 8);

    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("scripts");
    let artifact = render(&store, DEFAULT_BASENAME).unwrap();
    let (source_path, header_path) = artifact.write_to(&out_dir).await.unwrap();

    let source = std::fs::read_to_string(source_path).unwrap();
    let header = std::fs::read_to_string(header_path).unwrap();

    assert!(header.contains("#define UAT_ALT_BARO"));
    assert!(header.contains("} uat_uplink_test_frame_t;"));

    assert!(source.contains("#include \"uat_test_data.h\""));
    assert!(source.contains("// Downlink_MDB0_AddrABCDEF_0"));
    assert!(source.contains(&format!("\"{}\",  // frame_data_hex", downlink_hex())));
    assert!(source.contains("40.000000, -80.000000"));
    assert!(source.contains("// Uplink_Site3_Slot5_0"));
    assert!(source.contains("        432,  // frame_length\n"));
    // Reported count kept verbatim, slots stop at eight
    assert!(source.contains("0, 0.000000, 0.000000, 0, 0, 5, 3, 11  // position_valid,"));
    assert!(source.contains("            {17, 0,"));
    assert!(!source.contains("{18, 0,"));
    assert!(source.contains("static const int uat_downlink_test_frames_count = 1;"));
    assert!(source.contains("static const int uat_uplink_test_frames_count = 1;"));
}

#[tokio::test]
async fn test_empty_replay_still_emits_valid_pair() {
    let mut pipeline = Pipeline::new(10);
    pipeline.run(&b""[..], pending::<()>()).await.unwrap();
    assert_eq!(pipeline.stats().frames, 0);

    let tmp = tempfile::tempdir().unwrap();
    let artifact = render(pipeline.store(), "empty").unwrap();
    let (source_path, _) = artifact.write_to(tmp.path()).await.unwrap();

    let source = std::fs::read_to_string(source_path).unwrap();
    assert!(source.contains("uat_downlink_test_frames_count = 0;"));
    assert!(source.contains("uat_uplink_test_frames_count = 0;"));
}

#[tokio::test]
async fn test_render_repeatable_across_runs() {
    let input = replay();
    let mut first = Pipeline::new(1000);
    first.run(input.as_bytes(), pending::<()>()).await.unwrap();
    let mut second = Pipeline::new(1000);
    second.run(input.as_bytes(), pending::<()>()).await.unwrap();

    assert_eq!(
        render(first.store(), DEFAULT_BASENAME).unwrap(),
        render(second.store(), DEFAULT_BASENAME).unwrap()
    );
}
