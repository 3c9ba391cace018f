use crate::mach::{inspect, Event, Runtime};


fn runtime(source: &str) -> Runtime {
    Runtime::load(source).unwrap()
}

fn run(runtime: &mut Runtime) -> String {
    run_cycles(runtime, 5000)
}

fn run_cycles(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) | Event::Warning(error) => {
                s.push_str(&format!("{}\n", error));
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(ps);
            }
            Event::Inspect(dump) => {
                s.push_str(&format!("{}\n", inspect(dump, false)));
            }
            Event::Async {
                function,
                line_number,
            } => {
                s.push_str(&format!("<async {} from {}>\n", function, line_number));
            }
            Event::Sleep(_) => {}
            Event::Exit(status) => {
                s.push_str(&format!("<exit {}>\n", status));
            }
        }
        match event {
            Event::Running => prev_running = true,
            _ => prev_running = false,
        }
    }
    s
}
