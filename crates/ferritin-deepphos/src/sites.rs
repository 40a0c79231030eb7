//! Site types and kinase hierarchies used to pick a model.
use crate::error::PredictError;
use clap::ValueEnum;
use strum::{Display, EnumString};

/// Residue class a model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SiteType {
    /// Serine / threonine
    #[strum(to_string = "ST", serialize = "S,T")]
    SerThr,
    /// Tyrosine
    #[strum(to_string = "Y")]
    Tyr,
}

impl SiteType {
    pub fn parse(value: &str) -> Result<Self, PredictError> {
        value
            .trim()
            .parse()
            .map_err(|_| PredictError::UnknownSiteType(value.to_string()))
    }
    /// Residues scored by this site type.
    pub fn residues(&self) -> &'static [char] {
        match self {
            SiteType::SerThr => &['S', 'T'],
            SiteType::Tyr => &['Y'],
        }
    }
    /// Label used in the general model file names.
    pub fn weights_label(&self) -> &'static str {
        match self {
            SiteType::SerThr => "S,T",
            SiteType::Tyr => "Y",
        }
    }
}

/// Level of the kinase classification a kinase-specific model was trained at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Hierarchy {
    Group,
    Family,
    Subfamily,
    Kinase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrameKind {
    #[value(name = "general")]
    General,
    #[value(name = "kinase")]
    Kinase,
}

/// Which pretrained model scores the sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictFrame {
    General {
        sites: SiteType,
    },
    Kinase {
        sites: SiteType,
        hierarchy: Hierarchy,
        kinase: String,
    },
}

impl PredictFrame {
    pub fn general(sites: SiteType) -> Self {
        PredictFrame::General { sites }
    }

    pub fn kinase(
        sites: SiteType,
        hierarchy: Hierarchy,
        kinase: impl Into<String>,
    ) -> Result<Self, PredictError> {
        let kinase: String = kinase.into();
        let kinase = kinase.trim();
        if kinase.is_empty() {
            return Err(PredictError::MissingKinase);
        }
        // the name becomes part of a file name
        if kinase.contains(['/', '\\']) || kinase.starts_with('.') {
            return Err(PredictError::InvalidKinase(kinase.to_string()));
        }
        Ok(PredictFrame::Kinase {
            sites,
            hierarchy,
            kinase: kinase.to_string(),
        })
    }

    /// Build a frame from the command line's site type, frame kind and optional kinase names.
    pub fn from_parts(
        kind: FrameKind,
        sites: &str,
        hierarchy: Option<Hierarchy>,
        kinase: Option<&str>,
    ) -> Result<Self, PredictError> {
        let sites = SiteType::parse(sites)?;
        match kind {
            FrameKind::General => Ok(PredictFrame::general(sites)),
            FrameKind::Kinase => {
                let (Some(hierarchy), Some(kinase)) = (hierarchy, kinase) else {
                    return Err(PredictError::MissingKinase);
                };
                PredictFrame::kinase(sites, hierarchy, kinase)
            }
        }
    }

    pub fn sites(&self) -> SiteType {
        match self {
            PredictFrame::General { sites } | PredictFrame::Kinase { sites, .. } => *sites,
        }
    }
}
