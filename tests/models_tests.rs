// Model serialization tests (wire field names, degraded metrics)

use sysmon::models::*;

fn cpu() -> CpuSnapshot {
    CpuSnapshot {
        cpu_per_core: vec![40.1, 50.3],
        cpu_freq_current: 2500.0,
        cpu_freq_min: 800.0,
        cpu_freq_max: 3200.0,
        cpu_count: 2,
    }
}

#[test]
fn test_cpu_snapshot_field_names() {
    let json = serde_json::to_value(cpu()).unwrap();
    assert_eq!(json["cpu_per_core"], serde_json::json!([40.1, 50.3]));
    assert_eq!(json["cpu_freq_current"], 2500.0);
    assert_eq!(json["cpu_count"], 2);
}

#[test]
fn test_memory_snapshot_field_names() {
    let mem = MemorySnapshot {
        memory_total: 16_777_216,
        memory_available: 8_388_608,
        memory_used: 8_388_608,
        memory_percent: 50.0,
        swap_total: 4_194_304,
        swap_used: 1_048_576,
        swap_free: 3_145_728,
        swap_percent: 25.0,
    };
    let json = serde_json::to_value(&mem).unwrap();
    for key in [
        "memory_total",
        "memory_available",
        "memory_used",
        "memory_percent",
        "swap_total",
        "swap_used",
        "swap_free",
        "swap_percent",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn test_disk_snapshot_wraps_partitions_in_disks() {
    let disk = DiskSnapshot {
        disks: vec![DiskPartitionSnapshot {
            device: "/dev/sda1".into(),
            mountpoint: "/".into(),
            fstype: "ext4".into(),
            total: 250_790_436_864,
            used: 168_732_672_000,
            free: 82_057_764_864,
            percent: 67.3,
        }],
    };
    let json = serde_json::to_value(&disk).unwrap();
    assert_eq!(json["disks"][0]["mountpoint"], "/");
    assert_eq!(json["disks"][0]["fstype"], "ext4");
    assert_eq!(json["disks"][0]["percent"], 67.3);
}

#[test]
fn test_failed_metric_serializes_as_error_object() {
    let m: Metric<NetworkSnapshot> = Metric::failed("no such file");
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "no such file" }));
}

#[test]
fn test_ok_metric_serializes_transparently() {
    let m = Metric::Ok(NetworkSnapshot {
        bytes_sent: 1,
        bytes_recv: 2,
        packets_sent: 3,
        packets_recv: 4,
    });
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "bytes_sent": 1,
            "bytes_recv": 2,
            "packets_sent": 3,
            "packets_recv": 4
        })
    );
}

#[test]
fn test_system_snapshot_mixes_ok_and_failed_metrics() {
    let snap = SystemSnapshot {
        timestamp: 1_648_456_789.123,
        cpu: Metric::Ok(cpu()),
        memory: Metric::failed("meminfo unavailable"),
        disk: Metric::Ok(DiskSnapshot::default()),
        network: Metric::Ok(NetworkSnapshot::default()),
    };
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["timestamp"], 1_648_456_789.123);
    assert_eq!(json["cpu"]["cpu_count"], 2);
    assert_eq!(json["memory"]["error"], "meminfo unavailable");
    assert_eq!(json["disk"]["disks"], serde_json::json!([]));
    let back: SystemSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snap);
}
