use bimap::BiMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use strum::{EnumCount, EnumIter};

/// Hardware status signals a transition can test. The discriminant is the
/// index written into the condition fields.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum Status {
    False,
    True,
    TimeOut,
    SatCount0,
    SatCount1,
    SatCount2,
    SatCount3,
    SatCount4,
    GenCount0,
    GenCount1,
    GenCount2,
    AdcPowdBmRad,
    ChannelBW80,
    NoRFGainUpt,
    RfGainCp2Max,
    RfGainCp2Min,
    RfGainCp2Min4Sat,
    DemodRun,
    CmdCtrlFlag,
    ExtTrigger,
    Sat,
    CrossUp,
    CrossDn,
    RampUp,
    RampDn,
    AdcPowDis,
    StablePow,
    OfdmCC,
    OfdmAC,
    DsssCC,
    DsssAC,
    FoundSFD,
    NoGainUpt,
    ChannelBW20,
    ChannelBW40,
    ValidLSIG,
    ValidHTSIG,
    RxEnd4Timing,
    RxHETBEn,
    OfdmOnly,
    RifsDet,
    InbdPowSup,
    InbdPowInf,
    AdcPowSup,
    AdcPowInf,
    AdcPowdBmSup,
    AdcPowdBmInf,
    IdPow,
    HtstfStEst,
    HtstfGainUpdt,
    FomHigh,
    FomMed,
    FomSing,
    FreqHigh,
    FreqLow,
    FreqSing,
    FreqDC,
    LengthHigh,
    LengthLow,
    Meas1Done,
    Meas2Done,
    Meas3Done,
    RadarDet,
    DsssContDet,
    OFDMPackDet,
    LNASatDet,
    OFDMPacVerify,
    LTFSYNC,
    RxTdmaEn,
}

static STATUS_STR: Lazy<BiMap<Status, &'static str>> = Lazy::new(|| {
    let mut map: BiMap<Status, &'static str> = BiMap::new();
    map.insert(Status::False, "false");
    map.insert(Status::True, "true");
    map.insert(Status::TimeOut, "timeOut");
    map.insert(Status::SatCount0, "satCount0");
    map.insert(Status::SatCount1, "satCount1");
    map.insert(Status::SatCount2, "satCount2");
    map.insert(Status::SatCount3, "satCount3");
    map.insert(Status::SatCount4, "satCount4");
    map.insert(Status::GenCount0, "genCount0");
    map.insert(Status::GenCount1, "genCount1");
    map.insert(Status::GenCount2, "genCount2");
    map.insert(Status::AdcPowdBmRad, "adcPowdBmRad");
    map.insert(Status::ChannelBW80, "channelBW80");
    map.insert(Status::NoRFGainUpt, "noRFGainUpt");
    map.insert(Status::RfGainCp2Max, "rfGainCp2Max");
    map.insert(Status::RfGainCp2Min, "rfGainCp2Min");
    map.insert(Status::RfGainCp2Min4Sat, "rfGainCp2Min4Sat");
    map.insert(Status::DemodRun, "demodRun");
    map.insert(Status::CmdCtrlFlag, "cmdCtrlFlag");
    map.insert(Status::ExtTrigger, "extTrigger");
    map.insert(Status::Sat, "sat");
    map.insert(Status::CrossUp, "crossUp");
    map.insert(Status::CrossDn, "crossDn");
    map.insert(Status::RampUp, "rampUp");
    map.insert(Status::RampDn, "rampDn");
    map.insert(Status::AdcPowDis, "adcPowDis");
    map.insert(Status::StablePow, "stablePow");
    map.insert(Status::OfdmCC, "ofdmCC");
    map.insert(Status::OfdmAC, "ofdmAC");
    map.insert(Status::DsssCC, "dsssCC");
    map.insert(Status::DsssAC, "dsssAC");
    map.insert(Status::FoundSFD, "foundSFD");
    map.insert(Status::NoGainUpt, "noGainUpt");
    map.insert(Status::ChannelBW20, "channelBW20");
    map.insert(Status::ChannelBW40, "channelBW40");
    map.insert(Status::ValidLSIG, "validLSIG");
    map.insert(Status::ValidHTSIG, "validHTSIG");
    map.insert(Status::RxEnd4Timing, "rxEnd4Timing");
    map.insert(Status::RxHETBEn, "rxHETBEn");
    map.insert(Status::OfdmOnly, "ofdmOnly");
    map.insert(Status::RifsDet, "rifsDet");
    map.insert(Status::InbdPowSup, "inbdPowSup");
    map.insert(Status::InbdPowInf, "inbdPowInf");
    map.insert(Status::AdcPowSup, "adcPowSup");
    map.insert(Status::AdcPowInf, "adcPowInf");
    map.insert(Status::AdcPowdBmSup, "adcPowdBmSup");
    map.insert(Status::AdcPowdBmInf, "adcPowdBmInf");
    map.insert(Status::IdPow, "idPow");
    map.insert(Status::HtstfStEst, "htstfStEst");
    map.insert(Status::HtstfGainUpdt, "htstfGainUpdt");
    map.insert(Status::FomHigh, "fomHigh");
    map.insert(Status::FomMed, "fomMed");
    map.insert(Status::FomSing, "fomSing");
    map.insert(Status::FreqHigh, "freqHigh");
    map.insert(Status::FreqLow, "freqLow");
    map.insert(Status::FreqSing, "freqSing");
    map.insert(Status::FreqDC, "freqDC");
    map.insert(Status::LengthHigh, "lengthHigh");
    map.insert(Status::LengthLow, "lengthLow");
    map.insert(Status::Meas1Done, "meas1Done");
    map.insert(Status::Meas2Done, "meas2Done");
    map.insert(Status::Meas3Done, "meas3Done");
    map.insert(Status::RadarDet, "radarDet");
    map.insert(Status::DsssContDet, "dsssContDet");
    map.insert(Status::OFDMPackDet, "OFDMPackDet");
    map.insert(Status::LNASatDet, "LNASatDet");
    map.insert(Status::OFDMPacVerify, "OFDMPacVerify");
    map.insert(Status::LTFSYNC, "LTFSYNC");
    map.insert(Status::RxTdmaEn, "RxTdmaEn");
    map
});

impl Status {
    pub fn parse(s: &str) -> Result<Status, String> {
        match STATUS_STR.get_by_right(s) {
            Some(status) => Ok(*status),
            None => Err(format!("Unknown status signal: `{}`", s)),
        }
    }

    pub fn name(&self) -> &'static str {
        STATUS_STR.get_by_left(self).copied().unwrap_or("?")
    }

    pub fn index(self) -> u8 {
        self.into()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
