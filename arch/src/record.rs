use color_print::cformat;

use crate::field::{pack, Bits};
use crate::status::Status;

// ----------------------------------------------------------------------------
// Info

/// Mandatory first word of every state.
///
/// `cmd_ext_en` is parsed and width checked but not part of the word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub nb_trans: Bits,
    pub cmd_en: Bits,
    pub cmd_ext_en: Bits,
    pub timeout_en: Bits,
    pub sleep_en: Bits,
    pub timeout_val: Bits,
    pub dsp_en: Bits,
}

impl Default for Info {
    fn default() -> Self {
        Info {
            nb_trans: Bits::new(3),
            cmd_en: Bits::new(1),
            cmd_ext_en: Bits::new(1),
            timeout_en: Bits::new(1),
            sleep_en: Bits::new(1),
            timeout_val: Bits::new(11),
            dsp_en: Bits::new(15),
        }
    }
}

impl Info {
    pub fn to_bin(&self) -> u32 {
        pack(&[
            &self.nb_trans,
            &self.cmd_en,
            &self.timeout_en,
            &self.sleep_en,
            &self.timeout_val,
            &self.dsp_en,
        ])
    }

    pub fn cformat(&self) -> String {
        cformat!(
            "<red>info</> <blue>trans={} cmd={} tout={}/{} sleep={}</> <y>dsp={}</>",
            self.nb_trans.value(),
            self.cmd_en.value(),
            self.timeout_en.value(),
            self.timeout_val.value(),
            self.sleep_en.value(),
            self.dsp_en.render()
        )
    }
}

// ----------------------------------------------------------------------------
// Command

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    pub opcode: Bits,
    pub param2: Bits,
    pub param1: Bits,
    pub param0: Bits,
}

impl Default for Cmd {
    fn default() -> Self {
        Cmd {
            opcode: Bits::new(8),
            param2: Bits::new(8),
            param1: Bits::new(8),
            param0: Bits::new(8),
        }
    }
}

impl Cmd {
    pub fn to_bin(&self) -> u32 {
        pack(&[&self.opcode, &self.param2, &self.param1, &self.param0])
    }

    pub fn cformat(&self) -> String {
        cformat!(
            "<red>cmd </> <blue>0x{:02X}</> <y>[{}, {}, {}]</>",
            self.opcode.value(),
            self.param2.value(),
            self.param1.value(),
            self.param0.value()
        )
    }
}

// ----------------------------------------------------------------------------
// Transition

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trans {
    pub cond1: Bits,
    pub cond2: Bits,
    pub cond3: Bits,
    pub path_comb: Bits,
    pub op_comb: Bits,
    pub target: Bits,
    /// Target state name, resolved into `target` after parsing.
    pub label: String,
}

impl Default for Trans {
    fn default() -> Self {
        Trans {
            cond1: Bits::new(7),
            cond2: Bits::new(6),
            cond3: Bits::new(6),
            path_comb: Bits::new(1),
            op_comb: Bits::new(3),
            target: Bits::new(9),
            label: String::new(),
        }
    }
}

impl Trans {
    pub fn conds(&self) -> [&Bits; 3] {
        [&self.cond1, &self.cond2, &self.cond3]
    }

    pub fn tests(&self, status: Status) -> bool {
        self.conds()
            .iter()
            .any(|cond| cond.value() == status.index() as u32)
    }

    pub fn to_bin(&self) -> u32 {
        pack(&[
            &self.cond1,
            &self.cond2,
            &self.cond3,
            &self.path_comb,
            &self.op_comb,
            &self.target,
        ])
    }

    pub fn cformat(&self) -> String {
        let name = |cond: &Bits| {
            u8::try_from(cond.value())
                .ok()
                .and_then(|idx| Status::try_from(idx).ok())
                .map_or("?", |status| status.name())
        };
        cformat!(
            "<red>trans</> <blue>{} {} {}</> comb={}/{} <g>-> 0x{:03X}({})</>",
            name(&self.cond1),
            name(&self.cond2),
            name(&self.cond3),
            self.path_comb.value(),
            self.op_comb.value(),
            self.target.value(),
            self.label
        )
    }
}
