use criterion::{black_box, criterion_group, Criterion};
use iptrack::controller::{Command, ControllerOptions, Event, ViewStateController};
use iptrack::resolver::LocationRecord;
use iptrack::view;

criterion_group!(benches_controller, bench_controller);

fn record() -> LocationRecord {
    serde_json::from_str(
        r#"{"ip": "8.8.8.8", "city": "Mountain View", "region": "California",
            "country_name": "United States", "latitude": 37.751, "longitude": -97.822,
            "utc_offset": "-0700", "timezone": "America/Los_Angeles", "org": "Google LLC"}"#,
    )
    .unwrap()
}

pub fn bench_controller(c: &mut Criterion) {
    let record = record();

    c.bench_function("ViewStateController::update/submit+resolved", |b| {
        let mut controller = ViewStateController::new(ControllerOptions::default());
        b.iter(|| {
            let commands = controller.update(Event::Submit(black_box("8.8.8.8").to_owned()));
            for command in commands {
                if let Command::Resolve { ticket, .. } = command {
                    controller.update(Event::Resolved {
                        ticket,
                        outcome: Ok(record.clone()),
                    });
                }
            }
        })
    });

    {
        let mut controller = ViewStateController::new(ControllerOptions::default());
        let commands = controller.update(Event::Submit("8.8.8.8".to_owned()));
        for command in commands {
            if let Command::Resolve { ticket, .. } = command {
                controller.update(Event::Resolved {
                    ticket,
                    outcome: Ok(record.clone()),
                });
            }
        }
        let state = controller.state();
        c.bench_function("view::render", |b| b.iter(|| view::render(black_box(state))));
    }
}
