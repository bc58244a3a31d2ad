//! Field tables for the emitted fixture structures
//!
//! Each collection is described once here. The same table drives the C struct
//! declaration and every data row, so declaration and initializer order can't
//! drift apart. Reordering anything here is a breaking change for consumers.

use crate::store::FixtureEntry;
use crate::uat::{
    AuxStateVector, DownlinkRecord, InfoFrame, ModeStatus, StateVector, UplinkRecord,
    CALLSIGN_LEN, MAX_INFO_FRAMES,
};

/// C type of an emitted field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CType {
    Int,
    UInt16,
    UInt32,
    /// Printed with a fixed number of decimals
    Double { precision: usize },
    Str,
    Callsign,
}

impl CType {
    /// Member declaration, without indentation
    pub fn declare(self, name: &str) -> String {
        match self {
            CType::Int => format!("int {};", name),
            CType::UInt16 => format!("uint16_t {};", name),
            CType::UInt32 => format!("uint32_t {};", name),
            CType::Double { .. } => format!("double {};", name),
            CType::Str => format!("const char* {};", name),
            CType::Callsign => format!("char {}[{}];", name, CALLSIGN_LEN + 1),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub ctype: CType,
}

const fn field(name: &'static str, ctype: CType) -> Field {
    Field { name, ctype }
}

const fn int(name: &'static str) -> Field {
    field(name, CType::Int)
}

/// Run of fields sharing a declaration heading and a row annotation tag
#[derive(Debug)]
pub struct Group {
    /// Comment above the group in the struct declaration
    pub heading: Option<&'static str>,
    /// Prefix of the inline annotation on data rows
    pub tag: Option<&'static str>,
    /// One data row per slice
    pub rows: &'static [&'static [Field]],
}

impl Group {
    pub fn fields(&self) -> impl Iterator<Item = &'static Field> {
        self.rows.iter().flat_map(|row| row.iter())
    }
}

/// Fixed-size array of sub-structs at the end of a record
#[derive(Debug)]
pub struct NestedArray {
    pub heading: &'static str,
    pub name: &'static str,
    pub fields: &'static [Field],
    pub len: usize,
}

/// Everything needed to declare and emit one fixture collection
#[derive(Debug)]
pub struct Collection {
    /// Singular C identifier, e.g. `uat_downlink_test_frame`
    pub item: &'static str,
    /// Human label used in comments
    pub title: &'static str,
    pub groups: &'static [Group],
    pub nested: Option<NestedArray>,
}

impl Collection {
    pub fn type_name(&self) -> String {
        format!("{}_t", self.item)
    }

    pub fn array_name(&self) -> String {
        format!("{}s", self.item)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static Field> {
        self.groups.iter().flat_map(|group| group.fields())
    }
}

const FRAME: Group = Group {
    heading: None,
    tag: None,
    rows: &[
        &[field("frame_data_hex", CType::Str)],
        &[int("frame_length")],
        &[field("test_name", CType::Str)],
    ],
};

pub const DOWNLINK: Collection = Collection {
    item: "uat_downlink_test_frame",
    title: "Downlink",
    groups: &[
        FRAME,
        Group {
            heading: Some("Decoded HDR fields"),
            tag: Some("HDR"),
            rows: &[&[
                int("mdb_type"),
                int("address_qualifier"),
                field("address", CType::UInt32),
            ]],
        },
        Group {
            heading: Some("Decoded SV fields"),
            tag: Some("SV"),
            rows: &[
                &[
                    int("has_sv"),
                    int("nic"),
                    int("position_valid"),
                    field("lat", CType::Double { precision: 6 }),
                    field("lon", CType::Double { precision: 6 }),
                    int("altitude_type"),
                    int("altitude"),
                    int("airground_state"),
                ],
                &[
                    int("ns_vel_valid"),
                    int("ns_vel"),
                    int("ew_vel_valid"),
                    int("ew_vel"),
                    int("track_type"),
                    field("track", CType::UInt16),
                    int("speed_valid"),
                    field("speed", CType::UInt16),
                ],
                &[
                    int("vert_rate_source"),
                    int("vert_rate"),
                    int("dimensions_valid"),
                    field("length", CType::Double { precision: 1 }),
                    field("width", CType::Double { precision: 1 }),
                    int("position_offset"),
                    int("utc_coupled"),
                    int("tisb_site_id"),
                ],
            ],
        },
        Group {
            heading: Some("Decoded MS fields"),
            tag: Some("MS"),
            rows: &[
                &[
                    int("has_ms"),
                    int("emitter_category"),
                    field("callsign", CType::Callsign),
                    int("callsign_type"),
                    int("emergency_status"),
                    int("uat_version"),
                    int("sil"),
                    int("transmit_mso"),
                ],
                &[
                    int("nac_p"),
                    int("nac_v"),
                    int("nic_baro"),
                    int("has_cdti"),
                    int("has_acas"),
                    int("acas_ra_active"),
                    int("ident_active"),
                    int("atc_services"),
                    int("heading_type"),
                ],
            ],
        },
        Group {
            heading: Some("Decoded AUXSV fields"),
            tag: Some("AUXSV"),
            rows: &[&[
                int("has_auxsv"),
                int("sec_altitude_type"),
                int("sec_altitude"),
            ]],
        },
    ],
    nested: None,
};

pub const UPLINK: Collection = Collection {
    item: "uat_uplink_test_frame",
    title: "Uplink",
    groups: &[
        FRAME,
        Group {
            heading: Some("Decoded uplink fields"),
            tag: None,
            rows: &[&[
                int("position_valid"),
                field("lat", CType::Double { precision: 6 }),
                field("lon", CType::Double { precision: 6 }),
                int("utc_coupled"),
                int("app_data_valid"),
                int("slot_id"),
                int("tisb_site_id"),
                int("num_info_frames"),
            ]],
        },
    ],
    nested: Some(NestedArray {
        heading: "Info frame data",
        name: "info_frames",
        fields: &[
            int("length"),
            int("type"),
            int("is_fisb"),
            int("fisb_product_id"),
            int("fisb_a_flag"),
            int("fisb_g_flag"),
            int("fisb_p_flag"),
            int("fisb_s_flag"),
            int("fisb_hours"),
            int("fisb_minutes"),
            int("fisb_seconds"),
            int("fisb_seconds_valid"),
            int("fisb_month"),
            int("fisb_day"),
            int("fisb_monthday_valid"),
        ],
        len: MAX_INFO_FRAMES,
    }),
};

/// One emitted scalar
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v.into())
            }
        })*
    };
}

int_value!(u8, u16, u32, i16, i32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

/// Flattened field values of a fixture in table order
pub trait FixtureValues {
    fn values(&self) -> Vec<Value>;

    /// Rows of the nested array, always the full declared length
    fn nested_values(&self) -> Vec<Vec<Value>> {
        Vec::new()
    }
}

impl FixtureValues for FixtureEntry<DownlinkRecord> {
    fn values(&self) -> Vec<Value> {
        let r = &self.record;
        let sv_default = StateVector::default();
        let ms_default = ModeStatus::default();
        let aux_default = AuxStateVector::default();
        let sv = r.state_vector.as_ref().unwrap_or(&sv_default);
        let ms = r.mode_status.as_ref().unwrap_or(&ms_default);
        let aux = r.aux_state_vector.as_ref().unwrap_or(&aux_default);

        vec![
            self.hex.as_str().into(),
            self.raw.len().into(),
            self.name.as_str().into(),
            // HDR
            r.mdb_type.into(),
            r.address_qualifier.into(),
            r.address.into(),
            // SV
            r.state_vector.is_some().into(),
            sv.nic.into(),
            sv.position_valid.into(),
            sv.lat.into(),
            sv.lon.into(),
            (sv.altitude_type as u8).into(),
            sv.altitude.into(),
            sv.airground_state.into(),
            sv.ns_vel_valid.into(),
            sv.ns_vel.into(),
            sv.ew_vel_valid.into(),
            sv.ew_vel.into(),
            (sv.track_type as u8).into(),
            sv.track.into(),
            sv.speed_valid.into(),
            sv.speed.into(),
            (sv.vert_rate_source as u8).into(),
            sv.vert_rate.into(),
            sv.dimensions_valid.into(),
            sv.length.into(),
            sv.width.into(),
            sv.position_offset.into(),
            sv.utc_coupled.into(),
            sv.tisb_site_id.into(),
            // MS
            r.mode_status.is_some().into(),
            ms.emitter_category.into(),
            ms.callsign.as_str().into(),
            (ms.callsign_type as u8).into(),
            ms.emergency_status.into(),
            ms.uat_version.into(),
            ms.sil.into(),
            ms.transmit_mso.into(),
            ms.nac_p.into(),
            ms.nac_v.into(),
            ms.nic_baro.into(),
            ms.has_cdti.into(),
            ms.has_acas.into(),
            ms.acas_ra_active.into(),
            ms.ident_active.into(),
            ms.atc_services.into(),
            (ms.heading_type as u8).into(),
            // AUXSV
            r.aux_state_vector.is_some().into(),
            (aux.sec_altitude_type as u8).into(),
            aux.sec_altitude.into(),
        ]
    }
}

impl FixtureValues for FixtureEntry<UplinkRecord> {
    fn values(&self) -> Vec<Value> {
        let r = &self.record;
        vec![
            self.hex.as_str().into(),
            self.raw.len().into(),
            self.name.as_str().into(),
            r.position_valid.into(),
            r.lat.into(),
            r.lon.into(),
            r.utc_coupled.into(),
            r.app_data_valid.into(),
            r.slot_id.into(),
            r.tisb_site_id.into(),
            r.num_info_frames.into(),
        ]
    }

    fn nested_values(&self) -> Vec<Vec<Value>> {
        let empty = InfoFrame::default();
        (0..MAX_INFO_FRAMES)
            .map(|i| info_frame_values(self.record.info_frames.get(i).unwrap_or(&empty)))
            .collect()
    }
}

fn info_frame_values(frame: &InfoFrame) -> Vec<Value> {
    let fisb = frame.fisb.clone().unwrap_or_default();
    vec![
        frame.length.into(),
        frame.frame_type.into(),
        frame.fisb.is_some().into(),
        fisb.product_id.into(),
        fisb.a_flag.into(),
        fisb.g_flag.into(),
        fisb.p_flag.into(),
        fisb.s_flag.into(),
        fisb.hours.into(),
        fisb.minutes.into(),
        fisb.seconds.into(),
        fisb.seconds_valid.into(),
        fisb.month.into(),
        fisb.day.into(),
        fisb.monthday_valid.into(),
    ]
}
