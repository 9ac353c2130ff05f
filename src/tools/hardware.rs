// Built-in hardware panels of the RF modules

use std::fmt;

use serde::Deserialize;

/// RF module slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RfModule {
    Internal,
    External,
}

impl RfModule {
    pub const ALL: [RfModule; 2] = [RfModule::Internal, RfModule::External];

    pub fn as_str(&self) -> &'static str {
        match self {
            RfModule::Internal => "internal",
            RfModule::External => "external",
        }
    }
}

impl fmt::Display for RfModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Panels a module can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    SpectrumAnalyser,
    PowerMeter,
}

impl PanelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelKind::SpectrumAnalyser => "spectrum",
            PanelKind::PowerMeter => "power",
        }
    }

    /// Button label, e.g. "Spectrum (INT)" or "Power (EXT)"
    pub fn label(&self, module: RfModule) -> String {
        let kind = match self {
            PanelKind::SpectrumAnalyser => "Spectrum",
            PanelKind::PowerMeter => "Power",
        };
        let slot = match module {
            RfModule::Internal => "INT",
            RfModule::External => "EXT",
        };
        format!("{} ({})", kind, slot)
    }
}

/// What a module reported about itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ModuleInfo {
    #[serde(default)]
    pub spectrum_analyser: bool,
    #[serde(default)]
    pub power_meter: bool,
}

impl ModuleInfo {
    /// Panels in page order
    pub fn panels(&self) -> Vec<PanelKind> {
        let mut panels = Vec::with_capacity(2);
        if self.spectrum_analyser {
            panels.push(PanelKind::SpectrumAnalyser);
        }
        if self.power_meter {
            panels.push(PanelKind::PowerMeter);
        }
        panels
    }
}

/// Asks a module slot what it supports
pub trait ModuleProbe {
    /// `None` when no module answers in that slot
    fn probe(&mut self, module: RfModule) -> Option<ModuleInfo>;
}

/// Probe answering from the `[modules]` config section
#[derive(Debug, Clone, Default)]
pub struct ConfiguredProbe {
    pub internal: Option<ModuleInfo>,
    pub external: Option<ModuleInfo>,
}

impl ModuleProbe for ConfiguredProbe {
    fn probe(&mut self, module: RfModule) -> Option<ModuleInfo> {
        match module {
            RfModule::Internal => self.internal,
            RfModule::External => self.external,
        }
    }
}

/// Hardware answers kept for the lifetime of the tools page.
///
/// Modules are only queried on the first build; rebuilds reuse the answers
/// until `invalidate` is called.
#[derive(Debug, Default)]
pub struct HardwareSession {
    queried: bool,
    internal: Option<ModuleInfo>,
    external: Option<ModuleInfo>,
}

impl HardwareSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn is_queried(&self) -> bool {
        self.queried
    }

    /// Forget the cached answers so the next build probes again
    pub fn invalidate(&mut self) {
        self.queried = false;
        self.internal = None;
        self.external = None;
    }

    /// Available panels, probing the modules once per session
    pub fn panels(&mut self, probe: &mut impl ModuleProbe) -> Vec<(PanelKind, RfModule)> {
        if !self.queried {
            self.internal = probe.probe(RfModule::Internal);
            self.external = probe.probe(RfModule::External);
            self.queried = true;
            crate::core::debug_logger::log_event(&format!(
                "hardware probed: internal={:?} external={:?}",
                self.internal, self.external
            ));
        }

        let mut panels = Vec::new();
        for module in RfModule::ALL {
            let info = match module {
                RfModule::Internal => self.internal,
                RfModule::External => self.external,
            };
            if let Some(info) = info {
                panels.extend(info.panels().into_iter().map(|kind| (kind, module)));
            }
        }
        panels
    }
}
