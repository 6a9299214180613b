use agcasm::emit;
use agcasm::{compile, Error, Issue, DEFAULT_RAM};
use arch::sig::Lfsr;

const SAMPLE: &str = "\
// sample
case 'start':
    nb_trans = 2, cmdEn = 1, cmdExtEn = 1, timeOutEn = 1, sleepEn = 0, timeOutVal = 100, dspEn = [1 0 0 0 0 0 0 0 0 0 0 0 0 0 1]
    cmd = 5, param = [1,2,3]
    op{cond1 = 'timeOut', cond2 = 'false', cond3 = 'false', pathComb = 0, opComb = 0, target = 'done'}
    op{cond1 = 'sat', cond2 = 'crossUp', cond3 = 'true', pathComb = 1, opComb = 2, target = 'start'}
case 'done':
    nb_trans = 0, cmdEn = 0, cmdExtEn = 0, timeOutEn = 0, sleepEn = 1, timeOutVal = 0, dspEn = [0 0 0 0 0 0 0 0 0 0 0 0 0 0 0]
";

fn info(name: &str, nb_trans: usize) -> String {
    format!(
        "case '{}':\n  nb_trans = {}, cmdEn = 0, cmdExtEn = 0, timeOutEn = 0, sleepEn = 0, timeOutVal = 0, dspEn = [0 0 0 0 0 0 0 0 0 0 0 0 0 0 0]\n",
        name, nb_trans
    )
}

fn trans(target: &str) -> String {
    format!(
        "  op{{cond1 = 'true', cond2 = 'false', cond3 = 'false', pathComb = 0, opComb = 0, target = '{}'}}\n",
        target
    )
}

fn state(name: &str, targets: &[&str]) -> String {
    let mut src = info(name, targets.len());
    for target in targets {
        src.push_str(&trans(target));
    }
    src
}

#[test]
fn sample_image() {
    let image = compile(SAMPLE, 8).unwrap();
    assert_eq!(
        image.words(),
        &[
            0x5832_4001,
            0x0501_0203,
            0x0400_0004,
            0x28a8_3400,
            0x0400_0000,
            0,
            0,
            0xb9f1_e082
        ]
    );
    assert_eq!(image.used(), 5);
    assert_eq!(image.states().len(), 2);
}

#[test]
fn sample_full_ram() {
    let image = compile(SAMPLE, DEFAULT_RAM).unwrap();
    assert_eq!(image.capacity(), 512);
    assert_eq!(image.signature(), 0x90cb_c8c3);
    assert_eq!(
        emit::fingerprint(&emit::raw(image.words())),
        "2f42a6e50cd061ed68cc099c3935b217"
    );
}

#[test]
fn idle_state() {
    let src = info("idle", 0);
    let image = compile(&src, DEFAULT_RAM).unwrap();
    assert_eq!(image.used(), 1);
    assert!(image.words()[..511].iter().all(|word| *word == 0));

    let mut lfsr = Lfsr::new();
    for _ in 0..511 {
        lfsr.feed(0);
    }
    assert_eq!(image.signature(), lfsr.value());
    assert_eq!(image.signature(), 0x32e1_022d);
}

#[test]
fn hex_round_trip() {
    let image = compile(SAMPLE, 64).unwrap();
    let bits: String = emit::hex32(image.words())
        .iter()
        .map(|line| u32::from_str_radix(line, 16).unwrap())
        .map(|word| format!("{:032b}", word))
        .collect();
    assert_eq!(bits, image.bits());
}

#[test]
fn forward_reference() {
    let src = format!("{}{}", state("first", &["last"]), state("last", &["first"]));
    let image = compile(&src, DEFAULT_RAM).unwrap();
    // `last` starts after the two words of `first`
    assert_eq!(image.words()[1] & 0x1FF, 2);
    assert_eq!(image.words()[3] & 0x1FF, 0);
}

#[test]
fn unresolved_targets_are_all_reported() {
    let src = format!(
        "{}{}",
        state("a", &["ghost"]),
        state("b", &["a", "phantom"])
    );
    let Err(Error::Inconsistent(diags)) = compile(&src, DEFAULT_RAM) else {
        panic!("expected accumulated errors");
    };
    assert_eq!(
        diags.issues(),
        &[
            Issue::UnresolvedTarget("ghost".into(), 3),
            Issue::UnresolvedTarget("phantom".into(), 7),
        ]
    );
    let message = Error::Inconsistent(diags).to_string();
    assert!(message.contains("ghost"));
    assert!(message.contains("phantom"));
}

#[test]
fn mixed_issues_are_collected() {
    let src = format!(
        "{}{}",
        info("short", 2),
        state("cmd", &["short"]).replace("cmdEn = 0", "cmdEn = 1")
    );
    let Err(Error::Inconsistent(diags)) = compile(&src, DEFAULT_RAM) else {
        panic!("expected accumulated errors");
    };
    assert_eq!(
        diags.issues(),
        &[
            Issue::TransCount("short".into(), 2),
            Issue::CmdEnable("cmd".into(), 4),
        ]
    );
}

#[test]
fn capacity_boundary() {
    let fits = state("s", &["s", "s"]);
    let image = compile(&fits, 4).unwrap();
    assert_eq!(image.used(), 3);
    assert_eq!(image.capacity(), 4);

    let full = state("s", &["s", "s", "s"]);
    assert!(matches!(
        compile(&full, 4),
        Err(Error::RamOverflow {
            used: 4,
            capacity: 4
        })
    ));
}

#[test]
fn target_beyond_address_field() {
    let mut src = String::new();
    for idx in 0..300 {
        src.push_str(&state(&format!("s{}", idx), &["s0"]));
    }
    src.push_str(&state("jump", &["s299"]));
    // s299 sits at word 598, which needs 10 bits
    let Err(Error::Inconsistent(diags)) = compile(&src, 1024) else {
        panic!("expected accumulated errors");
    };
    assert_eq!(diags.issues(), &[Issue::TargetOverflow("s299".into(), 598, 903)]);
}

#[test]
fn identical_runs() {
    let a = compile(SAMPLE, DEFAULT_RAM).unwrap();
    let b = compile(SAMPLE, DEFAULT_RAM).unwrap();
    assert_eq!(a.words(), b.words());
}

// ----------------------------------------------------------------------------
// Structural errors stop at the offending line

fn assert_fails(src: &str, check: impl Fn(&Error) -> bool) {
    match compile(src, DEFAULT_RAM) {
        Ok(_) => panic!("compiled:\n{}", src),
        Err(err) => assert!(check(&err), "unexpected error: {}", err),
    }
}

macro_rules! case {
    ($name:ident, $src:expr, $pat:pat) => {
        #[test]
        fn $name() {
            assert_fails(&$src, |err| matches!(err, $pat));
        }
    };
}

case!(
    unknown_status,
    info("a", 1) + "  op{cond1 = 'nope', cond2 = 'false', cond3 = 'false', pathComb = 0, opComb = 0, target = 'a'}\n",
    Error::UnknownStatus(_, 3)
);
case!(
    wide_status_in_second_slot,
    info("a", 1) + "  op{cond1 = 'true', cond2 = 'LNASatDet', cond3 = 'false', pathComb = 0, opComb = 0, target = 'a'}\n",
    Error::Overflow { line: 3, .. }
);
case!(
    missing_field,
    "case 'a':\n  nb_trans = 0, cmdEn = 0\n".to_string(),
    Error::Syntax(_, 2)
);
case!(
    orphan_record,
    trans("a"),
    Error::Orphan(1)
);
case!(
    second_info,
    info("a", 0) + &info("a", 0)[10..],
    Error::Duplicate("info", _, 3)
);
case!(
    timeout_too_wide,
    info("a", 0).replace("timeOutVal = 0", "timeOutVal = 2048"),
    Error::Overflow { line: 2, .. }
);
