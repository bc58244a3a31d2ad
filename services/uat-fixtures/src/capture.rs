//! Capture transform - decoder output plus raw bytes into a stored fixture

use crate::codec;
use crate::decoder::{AdsbMdb, DecodedMessage, UplinkInfoFrame, UplinkMdb};
use crate::error::CaptureError;
use crate::reader::RawFrame;
use crate::store::{FixtureEntry, FixtureStore};
use crate::uat::{
    AuxStateVector, Callsign, DownlinkRecord, FisbProduct, InfoFrame, ModeStatus, StateVector,
    UplinkRecord,
};

/// Capture one decoded frame into the store
///
/// `raw` and `decoded` must describe the same message; the kind is taken from
/// `decoded`. Returns the generated fixture name. A full collection leaves the
/// store untouched.
pub fn capture(
    store: &mut FixtureStore,
    raw: &RawFrame,
    decoded: &DecodedMessage,
) -> Result<String, CaptureError> {
    debug_assert_eq!(raw.kind, decoded.kind());

    let kind = decoded.kind();
    let full = CaptureError::CapacityExceeded {
        kind,
        capacity: store.capacity(kind),
    };
    if store.is_full(kind) {
        return Err(full);
    }

    let ordinal = store.count(kind);
    let hex = codec::encode(&raw.bytes);
    let (name, appended) = match decoded {
        DecodedMessage::Downlink(mdb) => {
            let record = DownlinkRecord::from(mdb.as_ref());
            let name = record.fixture_name(ordinal);
            let entry = FixtureEntry {
                name: name.clone(),
                raw: raw.bytes.clone(),
                hex,
                record,
            };
            (name, store.downlink.append(entry))
        }
        DecodedMessage::Uplink(mdb) => {
            let record = UplinkRecord::from(mdb.as_ref());
            let name = record.fixture_name(ordinal);
            let entry = FixtureEntry {
                name: name.clone(),
                raw: raw.bytes.clone(),
                hex,
                record,
            };
            (name, store.uplink.append(entry))
        }
    };

    if appended {
        Ok(name)
    } else {
        Err(full)
    }
}

impl From<&AdsbMdb> for DownlinkRecord {
    fn from(mdb: &AdsbMdb) -> Self {
        let state_vector = mdb.has_sv.then(|| StateVector {
            nic: mdb.nic,
            position_valid: mdb.position_valid,
            lat: mdb.lat,
            lon: mdb.lon,
            altitude_type: mdb.altitude_type.into(),
            altitude: mdb.altitude,
            airground_state: mdb.airground_state,
            ns_vel_valid: mdb.ns_vel_valid,
            ns_vel: mdb.ns_vel,
            ew_vel_valid: mdb.ew_vel_valid,
            ew_vel: mdb.ew_vel,
            track_type: mdb.track_type.into(),
            track: mdb.track,
            speed_valid: mdb.speed_valid,
            speed: mdb.speed,
            vert_rate_source: mdb.vert_rate_source.into(),
            vert_rate: mdb.vert_rate,
            dimensions_valid: mdb.dimensions_valid,
            length: mdb.length,
            width: mdb.width,
            position_offset: mdb.position_offset,
            utc_coupled: mdb.utc_coupled,
            tisb_site_id: mdb.tisb_site_id,
        });

        let mode_status = mdb.has_ms.then(|| ModeStatus {
            emitter_category: mdb.emitter_category,
            callsign: Callsign::new(&mdb.callsign),
            callsign_type: mdb.callsign_type.into(),
            emergency_status: mdb.emergency_status,
            uat_version: mdb.uat_version,
            sil: mdb.sil,
            transmit_mso: mdb.transmit_mso,
            nac_p: mdb.nac_p,
            nac_v: mdb.nac_v,
            nic_baro: mdb.nic_baro,
            has_cdti: mdb.has_cdti,
            has_acas: mdb.has_acas,
            acas_ra_active: mdb.acas_ra_active,
            ident_active: mdb.ident_active,
            atc_services: mdb.atc_services,
            heading_type: mdb.heading_type.into(),
        });

        let aux_state_vector = mdb.has_auxsv.then(|| AuxStateVector {
            sec_altitude_type: mdb.sec_altitude_type.into(),
            sec_altitude: mdb.sec_altitude,
        });

        Self {
            mdb_type: mdb.mdb_type,
            address_qualifier: mdb.address_qualifier,
            address: mdb.address,
            state_vector,
            mode_status,
            aux_state_vector,
        }
    }
}

impl From<&UplinkMdb> for UplinkRecord {
    fn from(mdb: &UplinkMdb) -> Self {
        let mut record = UplinkRecord {
            position_valid: mdb.position_valid,
            lat: mdb.lat,
            lon: mdb.lon,
            utc_coupled: mdb.utc_coupled,
            app_data_valid: mdb.app_data_valid,
            slot_id: mdb.slot_id,
            tisb_site_id: mdb.tisb_site_id,
            num_info_frames: mdb.num_info_frames,
            ..Default::default()
        };

        // Only the first num_info_frames entries are meaningful; anything past
        // the retained capacity is dropped.
        let reported = mdb.num_info_frames as usize;
        for frame in mdb.info_frames.iter().take(reported) {
            if !record.info_frames.append(InfoFrame::from(frame)) {
                break;
            }
        }

        record
    }
}

impl From<&UplinkInfoFrame> for InfoFrame {
    fn from(frame: &UplinkInfoFrame) -> Self {
        let fisb = frame.is_fisb.then(|| FisbProduct {
            product_id: frame.fisb.product_id,
            a_flag: frame.fisb.a_flag,
            g_flag: frame.fisb.g_flag,
            p_flag: frame.fisb.p_flag,
            s_flag: frame.fisb.s_flag,
            hours: frame.fisb.hours,
            minutes: frame.fisb.minutes,
            seconds: frame.fisb.seconds,
            seconds_valid: frame.fisb.seconds_valid,
            month: frame.fisb.month,
            day: frame.fisb.day,
            monthday_valid: frame.fisb.monthday_valid,
        });

        Self {
            length: frame.length,
            frame_type: frame.frame_type,
            fisb,
        }
    }
}
