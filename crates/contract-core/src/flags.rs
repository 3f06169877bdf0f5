//! Generation flags selecting which artifact groups are planned.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, GenError};

/// Named options controlling which artifacts a plan includes.
///
/// Every option toggles independently. The bit values used by [`GenerationFlags::bits`]
/// match the plugin parameter encoding of the C# contract generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationFlags {
    /// Emit the contract base skeleton.
    pub contract: bool,
    /// Emit the tester stub.
    pub tester: bool,
    /// Emit the typed reference state.
    pub reference: bool,
    /// Emit event accessors for event messages.
    pub events: bool,
    /// Use `internal` instead of `public` visibility on generated containers.
    pub internal_access: bool,
}

impl GenerationFlags {
    /// Bit for [`GenerationFlags::contract`].
    pub const CONTRACT: u8 = 0x01;
    /// Bit for [`GenerationFlags::tester`].
    pub const TESTER: u8 = 0x02;
    /// Bit for [`GenerationFlags::reference`].
    pub const REFERENCE: u8 = 0x04;
    /// Bit for [`GenerationFlags::events`].
    pub const EVENT: u8 = 0x08;
    /// Bit for [`GenerationFlags::internal_access`].
    pub const INTERNAL_ACCESS: u8 = 0x80;

    /// Flags with every option disabled.
    pub const fn none() -> Self {
        Self {
            contract: false,
            tester: false,
            reference: false,
            events: false,
            internal_access: false,
        }
    }

    /// Contract skeleton together with its events.
    pub const fn contract_with_events() -> Self {
        Self {
            contract: true,
            events: true,
            ..Self::none()
        }
    }

    /// Tester stub together with the events it observes.
    pub const fn tester_with_events() -> Self {
        Self {
            tester: true,
            events: true,
            ..Self::none()
        }
    }

    /// Decodes flags from the packed bit representation. Unknown bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            contract: bits & Self::CONTRACT != 0,
            tester: bits & Self::TESTER != 0,
            reference: bits & Self::REFERENCE != 0,
            events: bits & Self::EVENT != 0,
            internal_access: bits & Self::INTERNAL_ACCESS != 0,
        }
    }

    /// Encodes the flags into their packed bit representation.
    pub fn bits(&self) -> u8 {
        [
            (self.contract, Self::CONTRACT),
            (self.tester, Self::TESTER),
            (self.reference, Self::REFERENCE),
            (self.events, Self::EVENT),
            (self.internal_access, Self::INTERNAL_ACCESS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(0, |mask, (_, bit)| mask | bit)
    }

    /// Parses a comma separated plugin parameter such as `contract,event`.
    pub fn from_parameter(parameter: &str) -> Result<Self, GenError> {
        let mut flags = Self::none();
        for raw in parameter.split(',') {
            let name = raw.trim();
            match name {
                "" => {}
                "contract" => flags.contract = true,
                "tester" | "stub" => flags.tester = true,
                "reference" => flags.reference = true,
                "event" | "events" => flags.events = true,
                "internal_access" | "internal" => flags.internal_access = true,
                other => {
                    return Err(GenError::Config(
                        ErrorInfo::new("unknown-flag", format!("unknown generation flag `{other}`"))
                            .with_context("parameter", parameter)
                            .with_hint("expected contract, tester, reference, event or internal_access"),
                    ))
                }
            }
        }
        Ok(flags)
    }

    /// Returns the union of two flag sets.
    pub fn union(self, other: Self) -> Self {
        Self::from_bits(self.bits() | other.bits())
    }

    /// True when any container artifact (contract, tester, reference) is requested.
    pub const fn needs_container(&self) -> bool {
        self.contract || self.tester || self.reference
    }

    /// True when events are the only requested artifact.
    pub const fn events_only(&self) -> bool {
        self.events && !self.needs_container()
    }
}
