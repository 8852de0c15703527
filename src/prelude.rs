pub(crate) use bevy_log::prelude::*;
pub(crate) use bevy_math::*;
pub(crate) use default_struct_builder::*;
pub(crate) use indexmap::*;
pub(crate) use itertools::*;
pub(crate) use serde::*;
pub(crate) use smart_default::SmartDefault;
pub(crate) use std::collections::{HashMap, HashSet};
pub(crate) use std::{fmt, fs, io, path::Path};
pub(crate) use thiserror::Error;

pub use crate::{
	ConversionError,
	config::{AdjacencyPolicy, NszConfig},
	qmap::{MapDocument, MapEntity},
	zone::{CandidateZone, Zone, ZoneBrush},
};
