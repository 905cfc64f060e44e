use arch::model::State;
use sxasm::assemble;

const RUNNING_SUM: &str = "\
; running sum of 1..count, stored at `result`
        ldc 0x1000
        a2sp            ; stack frame at 0x1000
        ldc 0
        stl 0           ; sum = 0
        ldc count
        ldnl 0
        stl 1           ; i = count
loop:   ldl 1
        brz done
        ldl 0
        add             ; sum + i
        stl 0
        ldl 1
        adc -1
        stl 1           ; i = i - 1
        br loop
done:   ldl 0
        ldc result
        stnl 0
        HALT
count:  data 5
result: data 0
";

fn build(code: &str) -> Vec<u32> {
    let assembly = assemble(code).unwrap();
    print!("{}", assembly.assembler.msgs.log());
    let listing = assembly.listing.expect("assembly failed");
    print!("{}", listing.text());
    listing.words()
}

fn boot(words: &[u32]) -> State {
    let mut state = State::new();
    state.load(words);
    state
}

#[test]
fn running_sum() {
    let words = build(RUNNING_SUM);
    assert_eq!(words.len(), 22);

    let mut state = boot(&words);
    state.run(Some(1000)).unwrap();
    assert!(state.is_halted());
    assert_eq!(state.get(21), Ok(15));
    assert_eq!(state.get(0x1000), Ok(15));
    assert_eq!(state.get(0x1001), Ok(0));
    assert_eq!(state.executed(), 58);
}

#[test]
fn running_sum_trace() {
    let mut state = boot(&build(RUNNING_SUM));
    let mut trace = vec![];
    for _ in 0..8 {
        let exec = state.exec().unwrap();
        trace.push((exec.addr, state.a, state.b, state.sp));
    }
    assert_eq!(
        trace,
        vec![
            (0, 0x1000, 0, 0),
            (1, 0, 0, 0x1000),
            (2, 0, 0, 0x1000),
            (3, 0, 0, 0x1000),
            (4, 20, 0, 0x1000),
            (5, 5, 0, 0x1000),
            (6, 0, 0, 0x1000),
            (7, 5, 0, 0x1000),
        ]
    );
}

#[test]
fn listing_reassembles_to_same_object() {
    let first = assemble(RUNNING_SUM).unwrap().listing.unwrap();
    let stripped: String = first
        .text()
        .lines()
        .map(|line| format!("{}\n", &line[18..]))
        .collect();
    println!("{}", stripped);
    let second = assemble(&stripped).unwrap().listing.unwrap();
    assert_eq!(first.object(), second.object());
    assert_eq!(first.text(), second.text());
}

#[test]
fn set_constant_feeds_execution() {
    let code = "\
        ldc limit
        adc 0x10
        HALT
limit: SET 7
";
    let mut state = boot(&build(code));
    state.run(None).unwrap();
    assert_eq!(state.a, 23);
}
