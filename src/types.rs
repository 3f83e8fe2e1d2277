//! Band and mode reference tables.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! bands {
    ($($variant:ident => $name:literal, $lo:literal, $hi:literal;)+) => {
        /// Amateur band, named by wavelength.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Band {
            $(
                #[doc = $name]
                $variant,
            )+
        }

        impl Band {
            /// Every band, lowest frequency first.
            pub const ALL: &'static [Band] = &[$(Band::$variant),+];

            /// Canonical lowercase name, e.g. `20m` or `70cm`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Band::$variant => $name,)+
                }
            }

            /// Inclusive edges of the band in MHz.
            pub fn range_mhz(self) -> (f64, f64) {
                match self {
                    $(Band::$variant => ($lo, $hi),)+
                }
            }
        }
    };
}

bands! {
    B2200m => "2200m", 0.1357, 0.1358;
    B630m => "630m", 0.472, 0.479;
    B160m => "160m", 1.8, 2.0;
    B80m => "80m", 3.5, 4.0;
    B60m => "60m", 5.06, 5.45;
    B40m => "40m", 7.0, 7.3;
    B30m => "30m", 10.1, 10.15;
    B20m => "20m", 14.0, 14.35;
    B17m => "17m", 18.068, 18.168;
    B15m => "15m", 21.0, 21.45;
    B12m => "12m", 24.89, 24.99;
    B10m => "10m", 28.0, 29.7;
    B6m => "6m", 50.0, 54.0;
    B4m => "4m", 70.0, 71.0;
    B2m => "2m", 144.0, 148.0;
    B1_25m => "1.25m", 222.0, 225.0;
    B70cm => "70cm", 420.0, 450.0;
    B33cm => "33cm", 902.0, 928.0;
    B23cm => "23cm", 1240.0, 1300.0;
    B13cm => "13cm", 2300.0, 2450.0;
    B9cm => "9cm", 3300.0, 3500.0;
    B6cm => "6cm", 5650.0, 5925.0;
    B3cm => "3cm", 10000.0, 10500.0;
    B1_25cm => "1.25cm", 24000.0, 24250.0;
    B6mm => "6mm", 47000.0, 47200.0;
    B4mm => "4mm", 75500.0, 81000.0;
    B2_5mm => "2.5mm", 119980.0, 120020.0;
    B2mm => "2mm", 142000.0, 149000.0;
    B1mm => "1mm", 241000.0, 250000.0;
}

impl Band {
    /// Looks a band up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.as_str().eq_ignore_ascii_case(name))
    }

    /// True when `mhz` lies inside this band's edges.
    pub fn contains(self, mhz: f64) -> bool {
        let (lo, hi) = self.range_mhz();
        lo <= mhz && mhz <= hi
    }

    /// First band whose edges contain `mhz`.
    pub fn containing(mhz: f64) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.contains(mhz))
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Band {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value).ok_or_else(|| format!("unknown band {value}"))
    }
}

impl From<Band> for String {
    fn from(value: Band) -> Self {
        value.as_str().to_string()
    }
}

macro_rules! modes {
    ($($variant:ident => $name:literal,)+) => {
        /// Operating mode recognised in a log line.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Mode {
            $(
                #[doc = $name]
                $variant,
            )+
        }

        impl Mode {
            /// Every known mode.
            pub const ALL: &'static [Mode] = &[$(Mode::$variant),+];

            /// Canonical uppercase name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Mode::$variant => $name,)+
                }
            }
        }
    };
}

modes! {
    Cw => "CW",
    Ssb => "SSB",
    Usb => "USB",
    Lsb => "LSB",
    Am => "AM",
    Fm => "FM",
    Rtty => "RTTY",
    Ft8 => "FT8",
    Psk => "PSK",
    Jt65 => "JT65",
    Jt9 => "JT9",
    Ft4 => "FT4",
    Js8 => "JS8",
    Ardop => "ARDOP",
    Atv => "ATV",
    C4fm => "C4FM",
    Chip => "CHIP",
    Clo => "CLO",
    Contesti => "CONTESTI",
    DigitalVoice => "DIGITALVOICE",
    Domino => "DOMINO",
    Dstar => "DSTAR",
    Fax => "FAX",
    Fsk441 => "FSK441",
    Hell => "HELL",
    Iscat => "ISCAT",
    Jt4 => "JT4",
    Jt6m => "JT6M",
    Jt44 => "JT44",
    Mfsk => "MFSK",
    Msk144 => "MSK144",
    Mt63 => "MT63",
    Olivia => "OLIVIA",
    Opera => "OPERA",
    Pac => "PAC",
    Pax => "PAX",
    Pkt => "PKT",
    Psk2k => "PSK2K",
    Q15 => "Q15",
    Qra64 => "QRA64",
    Ros => "ROS",
    Rttym => "RTTYM",
    Sstv => "SSTV",
    T10 => "T10",
    Thor => "THOR",
    Thrb => "THRB",
    Tor => "TOR",
    V4 => "V4",
    Voi => "VOI",
    Winmor => "WINMOR",
    Wspr => "WSPR",
}

impl Mode {
    /// Looks a mode up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
    }

    /// Modes whose reports carry a tone digit (`599`).
    pub fn uses_tone_report(self) -> bool {
        matches!(
            self,
            Mode::Cw | Mode::Rtty | Mode::Rttym | Mode::Psk | Mode::Psk2k
        )
    }

    /// Phone modes, reported as readability and strength only (`59`).
    pub fn is_voice(self) -> bool {
        matches!(
            self,
            Mode::Ssb | Mode::Am | Mode::Fm | Mode::Lsb | Mode::Usb
        )
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Mode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value).ok_or_else(|| format!("unknown mode {value}"))
    }
}

impl From<Mode> for String {
    fn from(value: Mode) -> Self {
        value.as_str().to_string()
    }
}
