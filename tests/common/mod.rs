use asm::mach::{inspect, Event, Runtime};

#[allow(dead_code)]
pub fn load(source: &str) -> Runtime {
    Runtime::load(source).unwrap()
}

#[allow(dead_code)]
pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
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
            Event::Async { function, .. } => {
                s.push_str(&format!("<async {}>\n", function));
            }
            Event::Sleep(duration) => {
                s.push_str(&format!("<sleep {}>\n", duration.as_millis()));
            }
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

/// Run a whole program and return everything it printed.
#[allow(dead_code)]
pub fn run(source: &str) -> String {
    exec(&mut load(source))
}
