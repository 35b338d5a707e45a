use serde::ser::{Serialize, SerializeMap, Serializer};

use super::DriverMap;
use crate::schema::SampleValue;
use crate::session::Session;
use crate::tyre::{self, TyreCompound};

/// Key under which the fastest lap's compound is attached
pub const TYRE_KEY: &str = "tire";

/// Channel samples of one driver's fastest lap
///
/// Serializes as `{"<channel>": [...], ..., "tire": "<compound>"}` with
/// channels in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySeries {
    channels: Vec<(String, Vec<SampleValue>)>,
    tyre: TyreCompound,
}

impl TelemetrySeries {
    pub fn channel(&self, name: &str) -> Option<&[SampleValue]> {
        self.channels.iter().find(|(key, _)| key == name).map(|(_, samples)| samples.as_slice())
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|(key, _)| key.as_str())
    }

    pub fn tyre(&self) -> &TyreCompound {
        &self.tyre
    }
}

impl Serialize for TelemetrySeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.channels.len() + 1))?;
        for (name, samples) in &self.channels {
            map.serialize_entry(name, samples)?;
        }
        map.serialize_entry(TYRE_KEY, &self.tyre)?;
        map.end()
    }
}

/// Extract requested channels from each requested driver's fastest lap.
///
/// Drivers with no fastest lap (unknown codes included) are left out.
/// Channels the lap did not record are left out of that driver's series.
/// Samples pass through untouched in chronological order.
pub fn project_telemetry(session: &Session, drivers: &[String], channels: &[String]) -> DriverMap<TelemetrySeries> {
    let mut data = DriverMap::new();

    for code in drivers {
        if data.contains(code) {
            continue;
        }
        let laps = session.laps_for(code);
        let Some(fastest) = laps.fastest() else {
            continue;
        };

        let mut series = TelemetrySeries { channels: Vec::new(), tyre: tyre::resolve_compound(fastest) };
        if let Some(stream) = &fastest.telemetry {
            for name in channels {
                if name == TYRE_KEY || series.channel(name).is_some() {
                    continue;
                }
                if let Some(samples) = stream.channel(name) {
                    series.channels.push((name.clone(), samples.to_vec()));
                }
            }
        }
        data.insert(code.clone(), series);
    }

    data
}
