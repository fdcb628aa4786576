use nautomaton_lib::{
    automaton::{
        Automaton, Language,
        condition::Condition,
        determinize::convert_to_dfa_with_config,
        nfa::EpsilonNFA,
    },
    config::{DeterminizeConfig, GeneralConfig},
    logger::LogLevel,
};

fn main() -> anyhow::Result<()> {
    let config = DeterminizeConfig::from_optional_file(std::env::args().nth(1))?;

    let level = match std::env::var("NAUTOMATON_LOG") {
        Ok(level) => level.parse::<LogLevel>().map_err(anyhow::Error::msg)?,
        Err(_) => *config.logger().get_log_level(),
    };

    if *config.logger().get_enabled() || std::env::var("NAUTOMATON_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::from(level))
            .init();
    }

    let nfa = example_nfa();
    let dfa = convert_to_dfa_with_config(&nfa, &config)?;

    tracing::info!("NFA states: {:?}", nfa.states());
    tracing::info!("DFA initial state: {:?}", dfa.initial());
    tracing::info!("DFA final states: {:?}", dfa.finals());

    for state in dfa.states() {
        tracing::info!("DFA state {}", state);
    }

    for (condition, destination) in dfa.transitions() {
        tracing::info!("{} -> {}", condition, destination);
    }

    let word = "automaton".chars().collect::<Vec<_>>();
    tracing::info!("NFA on \"automaton\": {:?}", nfa.evaluate(&word));
    tracing::info!("DFA on \"automaton\": {:?}", dfa.evaluate(&word));

    Ok(())
}

/// States `0..=3` over `{a, m, n, o, t, u}`, accepting in state 3.
fn example_nfa() -> EpsilonNFA<u32, char> {
    let mut nfa = EpsilonNFA::with_inputs(['a', 'm', 'n', 'o', 't', 'u']);

    for state in 0..=3 {
        nfa.add_state(state);
    }

    nfa.set_initial(0);
    nfa.add_final(3);

    nfa.add_transition(Condition::labeled(0, 'a'), 1);
    nfa.add_transition(Condition::labeled(1, 'u'), 2);
    nfa.add_transition(Condition::labeled(2, 't'), 3);
    nfa.add_transition(Condition::labeled(3, 'o'), 2);
    nfa.add_transition(Condition::labeled(2, 'm'), 0);
    nfa.add_transition(Condition::labeled(0, 'a'), 2);
    nfa.add_transition(Condition::labeled(2, 'n'), 3);
    nfa.add_transition(Condition::spontaneous(0), 3);

    nfa
}
