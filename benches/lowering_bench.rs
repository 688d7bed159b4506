use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emberc::{
    Expression, Lowerer, PeripheralMap, Reg, Statement, Storage, Symbol, SymbolTable,
};

fn fixture_symbols() -> SymbolTable {
    let mut symbols = SymbolTable::new();
    symbols.insert(Symbol::variable("x", Storage::Stack { offset: 0 }));
    symbols.insert(Symbol::variable("var", Storage::Stack { offset: 4 }));
    symbols.insert(Symbol::variable("y", Storage::Stack { offset: 8 }));
    symbols.insert(Symbol::variable("z", Storage::Stack { offset: 12 }));
    symbols.insert(Symbol::array("arr", Storage::Stack { offset: 16 }));
    symbols.insert(Symbol::variable("g1", Storage::Global { address: 0x2000 }));
    symbols.insert(Symbol::pointer("addr_var", Storage::Register(Reg(12))));
    symbols
}

fn sample_program() -> Vec<Statement> {
    vec![
        Statement::assign(
            Expression::index("arr", Expression::literal(1)),
            Expression::literal(22),
        ),
        Statement::assign(
            Expression::variable("x"),
            Expression::index("arr", Expression::literal(1)),
        ),
        Statement::assign(Expression::variable("var"), Expression::literal(10)),
        Statement::assign(
            Expression::variable("y"),
            Expression::address_of(Expression::variable("var")),
        ),
        Statement::assign(
            Expression::variable("addr_var"),
            Expression::address_of(Expression::variable("var")),
        ),
        Statement::assign(
            Expression::variable("z"),
            Expression::deref(Expression::variable("addr_var")),
        ),
    ]
}

fn lowering_benchmark(c: &mut Criterion) {
    let symbols = fixture_symbols();
    let peripherals = PeripheralMap::default_layout();

    c.bench_function("lower array element store", |b| {
        let statement = Statement::assign(
            Expression::index("arr", Expression::literal(3)),
            Expression::literal(42),
        );
        b.iter(|| {
            let mut lowerer = Lowerer::new(&symbols, &peripherals);
            lowerer.lower_statement(black_box(&statement)).unwrap();
            lowerer.finish()
        })
    });

    c.bench_function("lower mixed program", |b| {
        let program = sample_program();
        b.iter(|| {
            let mut lowerer = Lowerer::new(&symbols, &peripherals);
            lowerer.lower_program(black_box(&program)).unwrap();
            lowerer.finish()
        })
    });

    c.bench_function("render assembly listing", |b| {
        let mut lowerer = Lowerer::new(&symbols, &peripherals);
        lowerer.lower_program(&sample_program()).unwrap();
        let stream = lowerer.finish();
        b.iter(|| black_box(&stream).to_string())
    });
}

criterion_group!(benches, lowering_benchmark);
criterion_main!(benches);
