use crate::error::PvmError;
use jr_common::UnsignedGas;
use jr_types::state::{Account, GlobalState, StateDelta};
use jr_types::workloads::WorkItem;
use std::collections::{BTreeMap, BTreeSet};

/// Ψ_A: maps a work item and the current global state to a state delta.
///
/// Implementations must not mutate the state they are given.
pub trait WorkItemExecutor {
    fn execute(&self, item: &WorkItem, state: &GlobalState) -> Result<StateDelta, PvmError>;
}

/// Reference executor interpreting the item's `input_data` as a `;`-separated
/// sequence of directives:
///
/// - `noop`
/// - `log:<message>`
/// - `set:<key>:<value>`
/// - `transfer:<from>:<to>:<amount>`
/// - `mint:<account>:<amount>`
/// - `trap:<message>` — aborts the item
///
/// Each directive debits gas; exceeding the item's `gas_limit` aborts with
/// `OutOfGas` before any directive output is produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct PayloadExecutor;

const GAS_NOOP: UnsignedGas = 1;
const GAS_LOG: UnsignedGas = 1;
const GAS_SET: UnsignedGas = 2;
const GAS_TRANSFER: UnsignedGas = 10;
const GAS_MINT: UnsignedGas = 10;

impl WorkItemExecutor for PayloadExecutor {
    fn execute(&self, item: &WorkItem, state: &GlobalState) -> Result<StateDelta, PvmError> {
        let directives = parse_directives(&item.input_data)?;

        let mut gas_spent: UnsignedGas = 0;
        for directive in &directives {
            gas_spent += directive.gas_cost();
        }
        if gas_spent > item.gas_limit {
            return Err(PvmError::OutOfGas {
                needed: gas_spent,
                limit: item.gas_limit,
            });
        }

        // Work on a scratch copy so later directives observe earlier ones,
        // then emit only the touched sections as the delta.
        let mut scratch = state.clone();
        let mut touched_accounts = BTreeSet::new();
        let mut data = BTreeMap::new();
        let mut log_lines = Vec::new();

        for directive in directives {
            match directive {
                Directive::Noop => {}
                Directive::Log(message) => log_lines.push(message),
                Directive::Set(key, value) => {
                    scratch.data.insert(key.clone(), value.clone());
                    data.insert(key, value);
                }
                Directive::Transfer { from, to, amount } => {
                    let from_balance = scratch
                        .accounts
                        .get(&from)
                        .ok_or_else(|| PvmError::MissingAccount(from.clone()))?
                        .balance;
                    if !scratch.accounts.contains_key(&to) {
                        return Err(PvmError::MissingAccount(to));
                    }
                    if from_balance < amount {
                        return Err(PvmError::InsufficientBalance {
                            account: from,
                            needed: amount,
                            available: from_balance,
                        });
                    }
                    if let Some(account) = scratch.accounts.get_mut(&from) {
                        account.balance -= amount;
                    }
                    if let Some(account) = scratch.accounts.get_mut(&to) {
                        account.balance += amount;
                    }
                    touched_accounts.insert(from);
                    touched_accounts.insert(to);
                }
                Directive::Mint { account, amount } => {
                    scratch
                        .accounts
                        .entry(account.clone())
                        .or_insert_with(|| Account::with_balance(0))
                        .balance += amount;
                    touched_accounts.insert(account);
                }
                Directive::Trap(message) => return Err(PvmError::Trap(message)),
            }
        }

        let accounts: BTreeMap<String, Account> = touched_accounts
            .into_iter()
            .filter_map(|id| scratch.accounts.get(&id).map(|a| (id, a.clone())))
            .collect();

        Ok(StateDelta {
            accounts: (!accounts.is_empty()).then_some(accounts),
            data: (!data.is_empty()).then_some(data),
            log: (!log_lines.is_empty()).then(|| log_lines.join("\n")),
        })
    }
}

enum Directive {
    Noop,
    Log(String),
    Set(String, String),
    Transfer {
        from: String,
        to: String,
        amount: u64,
    },
    Mint {
        account: String,
        amount: u64,
    },
    Trap(String),
}

impl Directive {
    fn gas_cost(&self) -> UnsignedGas {
        match self {
            Directive::Noop => GAS_NOOP,
            Directive::Log(_) => GAS_LOG,
            Directive::Set(_, _) => GAS_SET,
            Directive::Transfer { .. } => GAS_TRANSFER,
            Directive::Mint { .. } => GAS_MINT,
            Directive::Trap(_) => GAS_NOOP,
        }
    }
}

fn parse_directives(input: &str) -> Result<Vec<Directive>, PvmError> {
    input
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_directive)
        .collect()
}

fn parse_directive(part: &str) -> Result<Directive, PvmError> {
    match part.split(':').collect::<Vec<_>>().as_slice() {
        ["noop"] => Ok(Directive::Noop),
        ["log", message @ ..] => Ok(Directive::Log(message.join(":"))),
        ["set", key, value] => Ok(Directive::Set(key.to_string(), value.to_string())),
        ["transfer", from, to, amount] => Ok(Directive::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount: amount
                .parse()
                .map_err(|_| PvmError::Malformed(part.to_string()))?,
        }),
        ["mint", account, amount] => Ok(Directive::Mint {
            account: account.to_string(),
            amount: amount
                .parse()
                .map_err(|_| PvmError::Malformed(part.to_string()))?,
        }),
        ["trap", message @ ..] => Ok(Directive::Trap(message.join(":"))),
        [name, ..] => Err(PvmError::UnknownDirective(name.to_string())),
        [] => Err(PvmError::Malformed(part.to_string())),
    }
}
