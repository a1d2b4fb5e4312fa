//! Binary Outcome AMM Simulation.
//!
//! Walks the market lifecycle against the in-memory host ledger: funding,
//! price discovery, resolution, redemption, teardown.

use amm_core::*;

fn main() {
    println!("Binary Outcome AMM Core Engine Simulation");
    println!("Single Market, Yes/No Outcome Pair, Full Lifecycle\n");

    scenario_1_market_lifecycle();
    scenario_2_odds_discovery();
    scenario_3_rejected_operations();
    scenario_4_conservation_audit();

    println!("\nAll simulations completed successfully.");
}

struct Fixture {
    engine: Engine,
    ledger: InMemoryLedger,
    stablecoin: AssetId,
    creator: Address,
    market_addr: Address,
}

/// Create the market, fund a few trader accounts with stablecoin, run setup.
fn bootstrap(trader_names: &[&str]) -> (Fixture, Vec<Address>) {
    let market_addr = Address::new("MARKET");
    let creator = Address::new("CREATOR");
    let treasury = Address::new("TREASURY");

    let mut ledger = InMemoryLedger::new(market_addr.clone());
    let stablecoin = ledger.issue_asset(
        TokenSpec {
            name: "StableCoin".to_string(),
            unit_name: Some("USDC".to_string()),
            total: TOKEN_DEFAULT_SUPPLY,
        },
        &treasury,
    );

    let traders: Vec<Address> = trader_names.iter().map(|name| Address::new(*name)).collect();
    for trader in &traders {
        ledger
            .transfer(stablecoin, &treasury, trader, 10_000_000)
            .unwrap();
    }

    let params = MarketParams::new(creator.clone(), stablecoin, 1_000);
    let mut engine = Engine::create(EngineConfig::default(), params).unwrap();
    engine.set_time(Timestamp::now());

    engine
        .setup(&mut ledger, SetupRequest { sender: creator.clone() })
        .unwrap();

    (
        Fixture {
            engine,
            ledger,
            stablecoin,
            creator,
            market_addr,
        },
        traders,
    )
}

impl Fixture {
    /// The atomic deposit-then-call group the host ledger would apply.
    fn deposit(&mut self, from: &Address, amount: u64) {
        self.ledger
            .transfer(self.stablecoin, from, &self.market_addr, amount)
            .unwrap();
    }

    fn reserves(&self) -> ReserveLedger {
        *self.engine.reserves().unwrap()
    }
}

/// Full lifecycle: supply, both swaps, resolution, redemption, exit, close.
fn scenario_1_market_lifecycle() {
    println!("Scenario 1: Market Lifecycle\n");

    let (mut fx, traders) = bootstrap(&["ALICE", "BOB", "CAROL"]);
    let (alice, bob, carol) = (&traders[0], &traders[1], &traders[2]);

    fx.deposit(alice, 2_000_000);
    let supplied = fx
        .engine
        .supply(
            &mut fx.ledger,
            SupplyRequest {
                sender: alice.clone(),
                amount: 2_000_000,
            },
        )
        .unwrap();
    println!("  Alice supplies 2,000,000 -> {} pool tokens", supplied.minted);

    let r = fx.reserves();
    println!(
        "  Reserves seeded: yes {}, no {}, pool funding {}",
        r.yes_reserve, r.no_reserve, r.pool_funding_reserve
    );

    fx.deposit(bob, 100_000);
    let bought = fx
        .engine
        .swap(
            &mut fx.ledger,
            SwapRequest {
                sender: bob.clone(),
                side: Side::Yes,
                amount: 100_000,
            },
        )
        .unwrap();
    println!(
        "  Bob buys yes with 100,000 -> {} yes tokens, token funding {}",
        bought.tokens_out, bought.token_funding_reserve
    );

    fx.deposit(carol, 100_000);
    let hedged = fx
        .engine
        .swap(
            &mut fx.ledger,
            SwapRequest {
                sender: carol.clone(),
                side: Side::No,
                amount: 100_000,
            },
        )
        .unwrap();
    println!(
        "  Carol buys no with 100,000 -> {} no tokens, token funding {}",
        hedged.tokens_out, hedged.token_funding_reserve
    );

    let creator = fx.creator.clone();
    fx.engine
        .set_result(ResultRequest {
            sender: creator.clone(),
            winner: Side::Yes,
        })
        .unwrap();
    println!("  Creator resolves: YES");

    let yes_asset = fx.engine.market().unwrap().winner_asset().unwrap();
    let redeemed = fx
        .engine
        .redeem(
            &mut fx.ledger,
            RedeemRequest {
                sender: bob.clone(),
                asset: yes_asset,
                amount: bought.tokens_out,
            },
        )
        .unwrap();
    println!(
        "  Bob redeems {} yes tokens -> {} stablecoin",
        redeemed.amount, redeemed.payout
    );

    let exited = fx
        .engine
        .withdraw(
            &mut fx.ledger,
            WithdrawRequest {
                sender: alice.clone(),
                pool_token_amount: supplied.minted,
            },
        )
        .unwrap();
    println!(
        "  Alice withdraws all pool tokens -> {} stablecoin",
        exited.payout
    );

    fx.engine.close(CloseRequest { sender: creator }).unwrap();
    println!("  Creator closes the market");
    println!("  Events recorded: {}\n", fx.engine.events().len());
}

/// Implied odds track one-sided buying pressure.
fn scenario_2_odds_discovery() {
    println!("Scenario 2: Odds Discovery\n");

    let (mut fx, traders) = bootstrap(&["DAVE"]);
    let dave = &traders[0];

    fx.deposit(dave, 4_000_000);
    fx.engine
        .supply(
            &mut fx.ledger,
            SupplyRequest {
                sender: dave.clone(),
                amount: 4_000_000,
            },
        )
        .unwrap();

    let odds = implied_odds(&fx.reserves()).unwrap();
    println!(
        "  Fresh pool       yes {} / no {}",
        odds.yes.round_dp(4),
        odds.no.round_dp(4)
    );

    for round in 1..=3 {
        fx.deposit(dave, 200_000);
        fx.engine
            .swap(
                &mut fx.ledger,
                SwapRequest {
                    sender: dave.clone(),
                    side: Side::Yes,
                    amount: 200_000,
                },
            )
            .unwrap();
        let odds = implied_odds(&fx.reserves()).unwrap();
        println!(
            "  After yes buy {}  yes {} / no {}",
            round,
            odds.yes.round_dp(4),
            odds.no.round_dp(4)
        );
    }

    let quote = swap_preview(&fx.reserves(), Side::Yes, 200_000).unwrap();
    println!(
        "  Next 200,000 yes buy would pay {} per token ({}% impact)\n",
        quote.effective_price.round_dp(4),
        (quote.price_impact * rust_decimal::Decimal::from(100)).round_dp(2)
    );
}

/// Every failed precondition rejects the call with state untouched.
fn scenario_3_rejected_operations() {
    println!("Scenario 3: Rejected Operations\n");

    let (mut fx, traders) = bootstrap(&["ERIN"]);
    let erin = &traders[0];
    let creator = fx.creator.clone();

    let rejected = fx
        .engine
        .setup(&mut fx.ledger, SetupRequest { sender: creator.clone() });
    println!("  Second setup: {}", rejected.unwrap_err());

    let rejected = fx.engine.supply(
        &mut fx.ledger,
        SupplyRequest {
            sender: erin.clone(),
            amount: 500,
        },
    );
    println!("  Supply below minimum: {}", rejected.unwrap_err());

    let rejected = fx.engine.swap(
        &mut fx.ledger,
        SwapRequest {
            sender: erin.clone(),
            side: Side::Yes,
            amount: 100_000,
        },
    );
    println!("  Swap on empty pool: {}", rejected.unwrap_err());

    let rejected = fx.engine.set_result(ResultRequest {
        sender: erin.clone(),
        winner: Side::No,
    });
    println!("  Result from non-creator: {}", rejected.unwrap_err());

    fx.deposit(erin, 1_000_000);
    fx.engine
        .supply(
            &mut fx.ledger,
            SupplyRequest {
                sender: erin.clone(),
                amount: 1_000_000,
            },
        )
        .unwrap();
    let rejected = fx.engine.close(CloseRequest { sender: creator });
    println!("  Close with live liquidity: {}\n", rejected.unwrap_err());
}

/// The funding partition matches the coins the market actually holds.
fn scenario_4_conservation_audit() {
    println!("Scenario 4: Conservation Audit\n");

    let (mut fx, traders) = bootstrap(&["FRED", "GRACE"]);
    let (fred, grace) = (&traders[0], &traders[1]);

    fx.deposit(fred, 3_000_000);
    fx.engine
        .supply(
            &mut fx.ledger,
            SupplyRequest {
                sender: fred.clone(),
                amount: 3_000_000,
            },
        )
        .unwrap();

    for (side, amount) in [
        (Side::Yes, 250_000),
        (Side::No, 400_000),
        (Side::Yes, 125_000),
        (Side::No, 80_000),
    ] {
        fx.deposit(grace, amount);
        fx.engine
            .swap(
                &mut fx.ledger,
                SwapRequest {
                    sender: grace.clone(),
                    side,
                    amount,
                },
            )
            .unwrap();
    }

    let held = fx.ledger.balance(fx.stablecoin, &fx.market_addr);
    let r = fx.reserves();
    println!("  Market holds      {}", held);
    println!(
        "  Partition         pool {} + token {} = {}",
        r.pool_funding_reserve,
        r.token_funding_reserve,
        r.total_funding()
    );
    assert_eq!(held, r.total_funding());
    assert!(r.token_funding_pegged());
    println!("  Conservation and funding peg hold\n");
}
