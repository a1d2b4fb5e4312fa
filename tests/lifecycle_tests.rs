//! End-to-end operation sequences with exact integer expectations.
//!
//! The numbers in the full-lifecycle test are the reference values of the
//! contract this engine models: a 2,000,000 supply seeds 500,000 into each
//! pricing reserve, and a 100,000 yes buy pays out 83,333 tokens.

use amm_core::*;

struct Fixture {
    engine: Engine,
    ledger: InMemoryLedger,
    stablecoin: AssetId,
    creator: Address,
    market_addr: Address,
    tokens: SetupResult,
}

fn fixture(min_increment: u64) -> Fixture {
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
    for name in ["ALICE", "BOB", "CAROL"] {
        ledger
            .transfer(stablecoin, &treasury, &Address::new(name), 1_000_000_000)
            .unwrap();
    }

    let params = MarketParams::new(creator.clone(), stablecoin, min_increment);
    let mut engine = Engine::create(EngineConfig::default(), params).unwrap();
    let tokens = engine
        .setup(&mut ledger, SetupRequest { sender: creator.clone() })
        .unwrap();

    Fixture {
        engine,
        ledger,
        stablecoin,
        creator,
        market_addr,
        tokens,
    }
}

impl Fixture {
    /// Apply the atomic deposit-then-call group for supply; reverse the
    /// deposit when the call is rejected, as the host ledger would.
    fn supply(&mut self, sender: &Address, amount: u64) -> Result<SupplyResult, EngineError> {
        self.ledger
            .transfer(self.stablecoin, sender, &self.market_addr, amount)
            .unwrap();
        let result = self.engine.supply(
            &mut self.ledger,
            SupplyRequest {
                sender: sender.clone(),
                amount,
            },
        );
        if result.is_err() {
            self.ledger
                .transfer(self.stablecoin, &self.market_addr, sender, amount)
                .unwrap();
        }
        result
    }

    fn swap(&mut self, sender: &Address, side: Side, amount: u64) -> Result<SwapResult, EngineError> {
        self.ledger
            .transfer(self.stablecoin, sender, &self.market_addr, amount)
            .unwrap();
        let result = self.engine.swap(
            &mut self.ledger,
            SwapRequest {
                sender: sender.clone(),
                side,
                amount,
            },
        );
        if result.is_err() {
            self.ledger
                .transfer(self.stablecoin, &self.market_addr, sender, amount)
                .unwrap();
        }
        result
    }

    fn withdraw(&mut self, sender: &Address, pool_tokens: u64) -> Result<WithdrawResult, EngineError> {
        self.ledger
            .transfer(self.tokens.pool_asset, sender, &self.market_addr, pool_tokens)
            .unwrap();
        let result = self.engine.withdraw(
            &mut self.ledger,
            WithdrawRequest {
                sender: sender.clone(),
                pool_token_amount: pool_tokens,
            },
        );
        if result.is_err() {
            self.ledger
                .transfer(self.tokens.pool_asset, &self.market_addr, sender, pool_tokens)
                .unwrap();
        }
        result
    }

    fn redeem(&mut self, sender: &Address, asset: AssetId, amount: u64) -> Result<RedeemResult, EngineError> {
        self.ledger
            .transfer(asset, sender, &self.market_addr, amount)
            .unwrap();
        let result = self.engine.redeem(
            &mut self.ledger,
            RedeemRequest {
                sender: sender.clone(),
                asset,
                amount,
            },
        );
        if result.is_err() {
            self.ledger
                .transfer(asset, &self.market_addr, sender, amount)
                .unwrap();
        }
        result
    }

    fn reserves(&self) -> ReserveLedger {
        *self.engine.reserves().unwrap()
    }

    fn market_balance(&self) -> u64 {
        self.ledger.balance(self.stablecoin, &self.market_addr)
    }
}

#[test]
fn full_lifecycle_reference_numbers() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");
    let bob = Address::new("BOB");
    let carol = Address::new("CAROL");

    // first deposit pegs 1:1 and seeds a quarter per side
    let supplied = fx.supply(&alice, 2_000_000).unwrap();
    assert_eq!(supplied.minted, 2_000_000);
    let r = fx.reserves();
    assert_eq!(r.pool_outstanding, 2_000_000);
    assert_eq!(r.pool_funding_reserve, 2_000_000);
    assert_eq!(r.yes_reserve, 500_000);
    assert_eq!(r.no_reserve, 500_000);
    assert_eq!(r.token_funding_reserve, 0);

    // yes buy: 500,000 * 100,000 / 600,000 = 83,333
    let bought = fx.swap(&bob, Side::Yes, 100_000).unwrap();
    assert_eq!(bought.tokens_out, 83_333);
    let r = fx.reserves();
    assert_eq!(r.yes_outstanding, 83_333);
    assert_eq!(r.yes_reserve, 416_667);
    assert_eq!(r.token_funding_reserve, 166_666);
    assert_eq!(r.pool_funding_reserve, 1_933_334);
    assert!(r.token_funding_pegged());

    // no buy: 500,000 * 100,000 / 516,667 = 96,774
    let hedged = fx.swap(&carol, Side::No, 100_000).unwrap();
    assert_eq!(hedged.tokens_out, 96_774);
    let r = fx.reserves();
    assert_eq!(r.no_outstanding, 96_774);
    assert_eq!(r.no_reserve, 403_226);
    assert_eq!(r.token_funding_reserve, 193_548);
    assert_eq!(r.pool_funding_reserve, 2_006_452);
    assert!(r.token_funding_pegged());

    // the partition always matches the coins actually held
    assert_eq!(fx.market_balance(), fx.reserves().total_funding());

    let creator = fx.creator.clone();
    fx.engine
        .set_result(ResultRequest {
            sender: creator.clone(),
            winner: Side::Yes,
        })
        .unwrap();

    // winner redeems 2:1
    let redeemed = fx.redeem(&bob, fx.tokens.yes_asset, 83_333).unwrap();
    assert_eq!(redeemed.payout, 166_666);
    assert_eq!(redeemed.outstanding_remaining, 0);
    let r = fx.reserves();
    assert_eq!(r.token_funding_reserve, 26_882);
    assert_eq!(r.no_outstanding, 96_774); // loser untouched

    // LP exits; pricing reserves stay frozen after resolution
    let frozen = fx.reserves();
    let exited = fx.withdraw(&alice, 2_000_000).unwrap();
    assert_eq!(exited.payout, 2_006_452);
    let r = fx.reserves();
    assert_eq!(r.pool_outstanding, 0);
    assert_eq!(r.pool_funding_reserve, 0);
    assert_eq!(r.yes_reserve, frozen.yes_reserve);
    assert_eq!(r.no_reserve, frozen.no_reserve);

    // what remains on the ledger is exactly the unredeemed payout guarantee
    assert_eq!(fx.market_balance(), 26_882);

    fx.engine.close(CloseRequest { sender: creator }).unwrap();
    assert!(fx.engine.market().is_none());
}

#[test]
fn withdraw_everything_unresolved_empties_the_pool() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");

    fx.supply(&alice, 1_000_000).unwrap();
    let r = fx.reserves();
    assert_eq!((r.yes_reserve, r.no_reserve), (250_000, 250_000));

    let exited = fx.withdraw(&alice, 1_000_000).unwrap();
    assert_eq!(exited.payout, 1_000_000);

    let r = fx.reserves();
    assert_eq!(r.pool_outstanding, 0);
    assert_eq!(r.pool_funding_reserve, 0);
    assert_eq!((r.yes_reserve, r.no_reserve), (0, 0));

    let creator = fx.creator.clone();
    fx.engine.close(CloseRequest { sender: creator }).unwrap();
}

#[test]
fn partial_withdraw_shrinks_reserves_pro_rata() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");

    fx.supply(&alice, 1_000_000).unwrap();
    let exited = fx.withdraw(&alice, 500_000).unwrap();
    assert_eq!(exited.payout, 500_000);

    let r = fx.reserves();
    assert_eq!(r.pool_outstanding, 500_000);
    assert_eq!(r.pool_funding_reserve, 500_000);
    assert_eq!((r.yes_reserve, r.no_reserve), (125_000, 125_000));
}

#[test]
fn setup_runs_exactly_once() {
    let mut fx = fixture(1_000);
    let creator = fx.creator.clone();
    let rejected = fx
        .engine
        .setup(&mut fx.ledger, SetupRequest { sender: creator });
    assert_eq!(rejected.unwrap_err(), EngineError::AlreadyInitialized);
}

#[test]
fn supply_below_min_increment_rejected() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");
    let rejected = fx.supply(&alice, 999);
    assert_eq!(
        rejected.unwrap_err(),
        EngineError::BelowMinIncrement {
            amount: 999,
            min_increment: 1_000,
        }
    );
    // nothing changed
    assert_eq!(fx.reserves(), ReserveLedger::new());
}

#[test]
fn tiny_supply_floors_reserve_growth() {
    let mut fx = fixture(1);
    let alice = Address::new("ALICE");

    // amounts under 4 floor the quarter to zero reserve growth
    let supplied = fx.supply(&alice, 3).unwrap();
    assert_eq!(supplied.minted, 3);
    let r = fx.reserves();
    assert_eq!((r.yes_reserve, r.no_reserve), (0, 0));
    assert_eq!(r.pool_funding_reserve, 3);

    // a pool with no pricing reserves cannot sell outcome tokens
    let rejected = fx.swap(&alice, Side::Yes, 100);
    assert_eq!(
        rejected.unwrap_err(),
        EngineError::InsufficientLiquidity { amount: 100 }
    );
}

#[test]
fn equal_supplies_mint_equally() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");
    let bob = Address::new("BOB");

    let first = fx.supply(&alice, 1_000_000).unwrap();
    let second = fx.supply(&bob, 1_000_000).unwrap();
    assert_eq!(first.minted, second.minted);
    assert_eq!(fx.reserves().pool_outstanding, 2_000_000);
}

#[test]
fn swap_monotonicity() {
    let amounts = [50_000u64, 100_000, 200_000, 400_000];
    let mut last_out = 0;
    let mut last_reserve = u64::MAX;
    for amount in amounts {
        let mut fx = fixture(1_000);
        let alice = Address::new("ALICE");
        fx.supply(&alice, 2_000_000).unwrap();
        let result = fx.swap(&alice, Side::Yes, amount).unwrap();
        assert!(result.tokens_out > last_out);
        let reserve_after = fx.reserves().yes_reserve;
        assert!(reserve_after < last_reserve);
        last_out = result.tokens_out;
        last_reserve = reserve_after;
    }
}

#[test]
fn swap_rejected_after_resolution() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");
    let creator = fx.creator.clone();

    fx.supply(&alice, 1_000_000).unwrap();
    fx.engine
        .set_result(ResultRequest {
            sender: creator,
            winner: Side::No,
        })
        .unwrap();

    let rejected = fx.swap(&alice, Side::Yes, 100_000);
    assert_eq!(rejected.unwrap_err(), EngineError::AlreadyResolved);
}

#[test]
fn result_is_creator_only_and_one_shot() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");
    let creator = fx.creator.clone();

    let rejected = fx.engine.set_result(ResultRequest {
        sender: alice,
        winner: Side::Yes,
    });
    assert_eq!(rejected.unwrap_err(), EngineError::Unauthorized);

    fx.engine
        .set_result(ResultRequest {
            sender: creator.clone(),
            winner: Side::Yes,
        })
        .unwrap();
    let rejected = fx.engine.set_result(ResultRequest {
        sender: creator,
        winner: Side::No,
    });
    assert_eq!(rejected.unwrap_err(), EngineError::AlreadyResolved);
}

#[test]
fn redeem_gates() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");
    let bob = Address::new("BOB");
    let creator = fx.creator.clone();

    fx.supply(&alice, 2_000_000).unwrap();
    let bought = fx.swap(&bob, Side::Yes, 100_000).unwrap();

    // before resolution
    let rejected = fx.redeem(&bob, fx.tokens.yes_asset, bought.tokens_out);
    assert_eq!(rejected.unwrap_err(), EngineError::NotResolved);

    fx.engine
        .set_result(ResultRequest {
            sender: creator,
            winner: Side::Yes,
        })
        .unwrap();

    // losing token is permanently unredeemable
    let no_asset = fx.tokens.no_asset;
    let rejected = fx.engine.redeem(
        &mut fx.ledger,
        RedeemRequest {
            sender: bob.clone(),
            asset: no_asset,
            amount: 1,
        },
    );
    assert_eq!(rejected.unwrap_err(), EngineError::WrongToken(no_asset));

    // winner pays exactly 2:1
    let redeemed = fx.redeem(&bob, fx.tokens.yes_asset, bought.tokens_out).unwrap();
    assert_eq!(redeemed.payout, 2 * bought.tokens_out);
}

#[test]
fn withdraw_bounds() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");

    // empty pool
    let rejected = fx.engine.withdraw(
        &mut fx.ledger,
        WithdrawRequest {
            sender: alice.clone(),
            pool_token_amount: 1,
        },
    );
    assert_eq!(
        rejected.unwrap_err(),
        EngineError::InsufficientPoolTokens {
            requested: 1,
            outstanding: 0,
        }
    );

    fx.supply(&alice, 1_000_000).unwrap();
    let rejected = fx.engine.withdraw(
        &mut fx.ledger,
        WithdrawRequest {
            sender: alice,
            pool_token_amount: 1_000_001,
        },
    );
    assert_eq!(
        rejected.unwrap_err(),
        EngineError::InsufficientPoolTokens {
            requested: 1_000_001,
            outstanding: 1_000_000,
        }
    );
}

#[test]
fn close_gates() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");
    let creator = fx.creator.clone();

    fx.supply(&alice, 1_000_000).unwrap();

    let rejected = fx.engine.close(CloseRequest { sender: alice.clone() });
    assert_eq!(rejected.unwrap_err(), EngineError::Unauthorized);

    let rejected = fx.engine.close(CloseRequest { sender: creator.clone() });
    assert_eq!(
        rejected.unwrap_err(),
        EngineError::OutstandingLiquidity {
            outstanding: 1_000_000,
        }
    );

    fx.withdraw(&alice, 1_000_000).unwrap();
    fx.engine.close(CloseRequest { sender: creator.clone() }).unwrap();

    // everything after close is rejected
    let rejected = fx.engine.supply(
        &mut fx.ledger,
        SupplyRequest {
            sender: alice,
            amount: 1_000_000,
        },
    );
    assert_eq!(rejected.unwrap_err(), EngineError::MarketClosed);
    let rejected = fx.engine.close(CloseRequest { sender: creator });
    assert_eq!(rejected.unwrap_err(), EngineError::MarketClosed);
}

#[test]
fn skewed_ratio_fails_supply_closed() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");

    fx.supply(&alice, 2_000_000).unwrap();
    // drain the no reserve far below the yes reserve
    fx.swap(&alice, Side::No, 2_000_000).unwrap();
    let r = fx.reserves();
    assert_eq!(r.no_reserve, 100_000);
    assert_eq!(r.yes_reserve, 500_000);

    // (1 + 100,000) / (1 + 500,000) truncates to zero; the supply fails
    // closed instead of dividing by it
    let before = fx.reserves();
    let rejected = fx.supply(&alice, 1_000_000);
    assert_eq!(
        rejected.unwrap_err(),
        EngineError::Arithmetic(MathError::DivideByZero)
    );
    assert_eq!(fx.reserves(), before);
}

#[test]
fn event_log_records_the_lifecycle() {
    let mut fx = fixture(1_000);
    let alice = Address::new("ALICE");
    let creator = fx.creator.clone();

    fx.supply(&alice, 1_000_000).unwrap();
    fx.swap(&alice, Side::Yes, 50_000).unwrap();
    fx.engine
        .set_result(ResultRequest {
            sender: creator,
            winner: Side::Yes,
        })
        .unwrap();

    let kinds: Vec<&'static str> = fx
        .engine
        .events()
        .iter()
        .map(|e| match e.payload {
            EventPayload::MarketCreated(_) => "created",
            EventPayload::SetupCompleted(_) => "setup",
            EventPayload::LiquiditySupplied(_) => "supplied",
            EventPayload::OutcomeSwapped(_) => "swapped",
            EventPayload::LiquidityWithdrawn(_) => "withdrawn",
            EventPayload::MarketResolved(_) => "resolved",
            EventPayload::WinningsRedeemed(_) => "redeemed",
            EventPayload::MarketClosed(_) => "closed",
        })
        .collect();
    assert_eq!(kinds, vec!["created", "setup", "supplied", "swapped", "resolved"]);
}
